//! SDK error mapping

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use ec2flow_compute::ComputeError;

/// Convert an SDK failure into [`ComputeError::Api`], keeping the vendor error code
pub(crate) fn api_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ComputeError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_string);
    let message = DisplayErrorContext(&err).to_string();
    tracing::debug!("{} failed: {}", operation, message);
    ComputeError::Api {
        operation,
        code,
        message,
    }
}

/// Response was accepted but lacks a field the facade needs
pub(crate) fn incomplete(operation: &'static str, field: &str) -> ComputeError {
    ComputeError::Api {
        operation,
        code: None,
        message: format!("response carried no {}", field),
    }
}
