use crate::domain::model::BudgetOutcome;

pub fn evaluate(price: u64, budget: u64) -> BudgetOutcome {
    if price <= budget {
        BudgetOutcome::WithinBudget
    } else {
        BudgetOutcome::OverBudget {
            deficit: price - budget,
        }
    }
}
