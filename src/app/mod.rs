// Application layer: renders engine results for the command line.

pub mod output;

pub use output::OutputFormat;
