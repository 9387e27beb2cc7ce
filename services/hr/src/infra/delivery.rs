use crate::domain::ports::OtpDelivery;
use crate::domain::types::OtpMetadata;
use crate::error::HrServiceError;

/// Delivery channel that hands codes to the log stream.
///
/// The code itself is only emitted at `debug`, for local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDelivery;

impl OtpDelivery for TracingDelivery {
    async fn deliver(
        &self,
        recipient: &str,
        code: &str,
        metadata: &OtpMetadata,
    ) -> Result<(), HrServiceError> {
        tracing::info!(recipient, subject = %metadata, "otp delivered");
        tracing::debug!(recipient, code, "otp code");
        Ok(())
    }
}
