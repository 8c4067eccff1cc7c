/// Source of the uncertain part of a price. Stands in for a trained model;
/// implementations must return a value within `[lo, hi]` (both inclusive).
pub trait PriceSource: Send + Sync {
    fn draw(&self, lo: u64, hi: u64) -> u64;
}

impl<T: PriceSource + ?Sized> PriceSource for &T {
    fn draw(&self, lo: u64, hi: u64) -> u64 {
        (**self).draw(lo, hi)
    }
}

impl<T: PriceSource + ?Sized> PriceSource for Box<T> {
    fn draw(&self, lo: u64, hi: u64) -> u64 {
        (**self).draw(lo, hi)
    }
}
