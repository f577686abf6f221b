pub mod text;

#[cfg(test)]
pub mod test_helpers;
