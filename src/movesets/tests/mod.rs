pub mod common;




#[cfg(test)]
mod test_trading;

#[cfg(test)]
mod test_validation;
