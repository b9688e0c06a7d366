mod helpers;

mod construction;
#[cfg(unix)]
mod lifecycle;
#[cfg(unix)]
mod startup_errors;
