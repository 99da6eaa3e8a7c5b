pub mod lap;
pub mod loan;
pub mod policy;
pub mod repayment;

use serde::de::DeserializeOwned;

use crate::input;

/// Resolve a command's input: `--input` file first, then piped stdin,
/// then whatever the individual flags describe.
pub fn load_or_build<T, F>(
    path: Option<&str>,
    from_flags: F,
) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        input::file::read_input(path)
    } else if let Some(request) = input::stdin::read_piped()? {
        Ok(request)
    } else {
        from_flags()
    }
}
