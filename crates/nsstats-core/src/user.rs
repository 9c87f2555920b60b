use crate::{Error, Result};

/// Environment variables consulted for the login name, in order
const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Name of the user running the test.
///
/// Checks `LOGNAME`, `USER`, `LNAME` and `USERNAME`, then falls back to the
/// password database entry of the real uid on Unix.
pub fn current_user() -> Result<String> {
    if let Some(name) = user_from_env(|key| std::env::var(key).ok()) {
        return Ok(name);
    }

    #[cfg(unix)]
    {
        if let Some(name) = passwd_user_name() {
            return Ok(name);
        }
    }

    Err(Error::UnknownUser)
}

/// First non-empty login name found through `lookup`
pub fn user_from_env<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    USER_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
}

#[cfg(unix)]
fn passwd_user_name() -> Option<String> {
    use std::ffi::CStr;

    let mut buf = vec![0 as libc::c_char; 4096];
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    let rc = unsafe {
        libc::getpwuid_r(
            libc::getuid(),
            &mut pwd,
            buf.as_mut_ptr(),
            buf.len(),
            &mut result,
        )
    };

    if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
        return None;
    }

    // pw_name points into `buf`, which is still alive here
    let name = unsafe { CStr::from_ptr(pwd.pw_name) };
    Some(name.to_string_lossy().into_owned())
}
