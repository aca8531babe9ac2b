use relay_types::Error;
use tokio_util::sync::CancellationToken;

/// Checked at the start of every RPC-touching step, matching the
/// single-threaded cooperative cancellation model: a scan in progress always
/// finishes its current step before a cancellation is observed, so the
/// caller never sees partial results.
pub fn check_cancelled(cancellation: &CancellationToken) -> Result<(), Error> {
    if cancellation.is_cancelled() {
        Err(Error::Cancelled)
    } else {
        Ok(())
    }
}
