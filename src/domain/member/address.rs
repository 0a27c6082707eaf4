//! Postal address value object.

use serde::{Deserialize, Serialize};

/// A member's postal address. Every field is optional; profile updates merge
/// field-by-field rather than replacing the whole address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

impl Address {
    /// Merges a patch into this address. Fields present in the patch
    /// overwrite; absent fields keep their current value.
    pub fn merge(&mut self, patch: Address) {
        if patch.street.is_some() {
            self.street = patch.street;
        }
        if patch.number.is_some() {
            self.number = patch.number;
        }
        if patch.complement.is_some() {
            self.complement = patch.complement;
        }
        if patch.neighborhood.is_some() {
            self.neighborhood = patch.neighborhood;
        }
        if patch.city.is_some() {
            self.city = patch.city;
        }
        if patch.state.is_some() {
            self.state = patch.state;
        }
        if patch.zipcode.is_some() {
            self.zipcode = patch.zipcode;
        }
    }
}
