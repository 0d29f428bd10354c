//! End-to-end checks of model building across the public API of `tablegen`.

#[cfg(test)]
mod scenarios;
