pub mod flow;
pub mod google;
pub mod handlers;
#[cfg(test)]
pub mod testing;
