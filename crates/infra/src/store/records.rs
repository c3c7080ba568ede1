//! Collection bindings for the registry records.

use chipreg_registry::{Activity, Animal, User};

use super::Record;

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn unique_key(&self) -> Option<&str> {
        Some(&self.phone)
    }
}

impl Record for Animal {
    const COLLECTION: &'static str = "animals";

    fn unique_key(&self) -> Option<&str> {
        Some(&self.chip_number)
    }
}

impl Record for Activity {
    const COLLECTION: &'static str = "activities";
}
