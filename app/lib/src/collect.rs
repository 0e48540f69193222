//! Error collection for validators.
//!
//! [`collect`] runs a function and turns whatever it produces into a flat
//! list: each returned value becomes an `Ok` entry, a returned error becomes
//! a single `Err` entry, and a panic becomes an `Err` carrying
//! [`FormError::ValidatorPanicked`]. Nothing escapes to the caller.

use log::warn;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::FormError;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Call `f(args)` and collect its outcome.
///
/// A panic inside `f` is caught only when the build unwinds, which is the
/// default for every profile in this workspace. A binary built with
/// `panic = "abort"` still aborts.
///
/// # Examples
///
/// ```
/// use formcsv::{collect, FormError};
///
/// let ok = collect(|n: u32| Ok::<_, FormError>(vec![n, n + 1]), 1);
/// assert_eq!(ok.len(), 2);
///
/// let failed = collect(
///     |_: ()| Err::<Vec<u32>, _>(FormError::validation("age", "required")),
///     (),
/// );
/// assert!(matches!(failed[0], Err(FormError::Validation { .. })));
/// ```
pub fn collect<A, T, E, F>(f: F, args: A) -> Vec<std::result::Result<T, E>>
where
    F: FnOnce(A) -> std::result::Result<Vec<T>, E>,
    E: From<FormError>,
{
    match catch_unwind(AssertUnwindSafe(move || f(args))) {
        Ok(Ok(values)) => values.into_iter().map(Ok).collect(),
        Ok(Err(err)) => vec![Err(err)],
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("Collected panic from validator: {}", message);
            vec![Err(FormError::ValidatorPanicked { message }.into())]
        }
    }
}

/// Run a validator that reports problems as a list of errors.
///
/// The errors it returns and the error it fails with (if any) end up in one
/// list. An empty list means the input passed.
pub fn collect_errors<A, F>(f: F, args: A) -> Vec<FormError>
where
    F: FnOnce(A) -> crate::Result<Vec<FormError>>,
{
    collect(f, args)
        .into_iter()
        .map(|entry| match entry {
            Ok(err) | Err(err) => err,
        })
        .collect()
}
