//! TCP port check evaluation.

use std::time::Duration;

use async_trait::async_trait;
use tokio::{net::TcpStream, time::timeout as deadline};
use tracing::debug;

use crate::{
    check::{Evaluate, Outcome, PortCheck},
    error::CheckError,
};

#[async_trait]
impl Evaluate for PortCheck {
    /// Connection failures of any kind count as a closed port, so this never
    /// returns `Err`.
    async fn evaluate(&self, timeout: Duration) -> Result<Outcome, CheckError> {
        let address = self.address();
        debug!(check = %self.name, %address, ?timeout, "connecting");

        let connect = TcpStream::connect((self.bare_host(), self.port));

        let open = match deadline(timeout, connect).await {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                debug!(check = %self.name, %address, error = %e, "connection failed");
                false
            }
            Err(_) => {
                debug!(check = %self.name, %address, "connection timed out");
                false
            }
        };

        Ok(compare_state(open, self.expected.open))
    }
}

/// Compare the observed port state with the expected one
pub fn compare_state(open: bool, expected_open: bool) -> Outcome {
    match (open, expected_open) {
        (true, true) => Outcome::pass("is OPEN and expected to be OPEN"),
        (true, false) => Outcome::fail("is OPEN and expected to be CLOSED"),
        (false, false) => Outcome::pass("is CLOSED and expected to be CLOSED"),
        (false, true) => Outcome::fail("is CLOSED and expected to be OPEN"),
    }
}
