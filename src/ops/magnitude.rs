//! Magnitude replacement: impose measured Fourier magnitudes on a complex
//! grid while keeping each element's phase.

use crate::error::GridError;
use crate::grid::{ComplexGrid, RealGrid};
use crate::parallel::Comm;

/// Replace the magnitude of each element of `dest` with the co-indexed
/// value from `mags`, preserving phase.
///
/// A zero entry in `mags` means the magnitude was never measured there:
/// the element is left untouched, or zeroed when `zero_if_not_known` is
/// set. When `errors` supplies absolute uncertainties, a current magnitude
/// already inside [target−error, target+error] is kept, and one outside is
/// pulled only to the nearest interval edge.
pub fn transfer_magnitudes<C: Comm>(
    dest: &mut ComplexGrid,
    mags: &RealGrid,
    errors: Option<&RealGrid>,
    zero_if_not_known: bool,
    comm: &C,
) -> Result<(), GridError> {
    if mags.npix() != dest.npix() {
        return Err(GridError::ShapeMismatch(mags.npix(), dest.npix()));
    }
    if let Some(errors) = errors {
        if errors.npix() != dest.npix() {
            return Err(GridError::ShapeMismatch(errors.npix(), dest.npix()));
        }
    }

    for (ipix, z) in dest.local_mut().iter_mut().enumerate() {
        let target = mags.local()[ipix];
        if target == 0.0 {
            if zero_if_not_known {
                z.re = 0.0;
                z.im = 0.0;
            }
            continue;
        }
        let old_mag = (z.re * z.re + z.im * z.im).sqrt();
        let new_mag = match errors {
            Some(errors) => {
                let error = errors.local()[ipix];
                if old_mag > target + error {
                    target + error
                } else if old_mag < target - error {
                    target - error
                } else {
                    old_mag
                }
            }
            None => target,
        };
        // Unlikely that old_mag is 0, but guard the division.
        if old_mag != 0.0 {
            let ratio = new_mag / old_mag;
            z.re *= ratio;
            z.im *= ratio;
        } else {
            z.re += new_mag;
        }
    }
    comm.barrier();
    Ok(())
}
