use tracing::{debug, trace, warn};

use super::control::DirectoryControl;
use super::registry;
use super::response::ResponseControl;
use crate::Result;

/// Replaces every raw control with a known OID by its typed response
/// variant, in place. Unknown OIDs and already typed elements are left
/// alone.
///
/// If any recognized control fails to decode the whole call fails and the
/// slice is left exactly as it was passed in.
pub fn transform_controls(controls: &mut [ResponseControl]) -> Result<()> {
    let mut decoded = Vec::new();

    for (index, control) in controls.iter().enumerate() {
        let ResponseControl::Raw(raw) = control else {
            continue;
        };

        match registry::decode_response(raw) {
            Ok(Some(typed)) => {
                debug!("Decoded response control {} at position {}", raw.oid(), index);
                decoded.push((index, typed));
            }
            Ok(None) => {
                trace!("Passing through control {}", raw.oid());
            }
            Err(e) => {
                warn!("Failed to decode response control {}: {}", raw.oid(), e);
                return Err(e);
            }
        }
    }

    for (index, typed) in decoded {
        controls[index] = typed;
    }

    Ok(())
}

/// Convenience wrapper taking the raw controls from the transport.
pub fn transform(controls: Vec<DirectoryControl>) -> Result<Vec<ResponseControl>> {
    let mut controls: Vec<ResponseControl> = controls.into_iter().map(Into::into).collect();
    transform_controls(&mut controls)?;
    Ok(controls)
}
