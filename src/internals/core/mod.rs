pub mod fan;
pub mod ports;
pub mod presence;

#[cfg(test)]
pub mod testing;
