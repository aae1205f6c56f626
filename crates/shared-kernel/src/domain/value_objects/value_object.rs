// crates/shared-kernel/src/domain/value_objects/value_object.rs

use crate::errors::Result;

/// Valeur immuable, valide par construction.
pub trait ValueObject: PartialEq + Clone + Sized {
    fn validate(&self) -> Result<()>;

    /// Rend la valeur si elle respecte ses invariants.
    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
