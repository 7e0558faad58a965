//! Terse constructors for declared option lists.

use runtime_config::DeclaredOption;

pub fn literal(name: &str, value: &str) -> DeclaredOption {
    DeclaredOption::literal(name, value)
}

pub fn secret(name: &str, object: &str, key: &str) -> DeclaredOption {
    DeclaredOption::secret_ref(name, object, key)
}

pub fn config(name: &str, object: &str, key: &str) -> DeclaredOption {
    DeclaredOption::config_map_ref(name, object, key)
}

pub fn empty(name: &str) -> DeclaredOption {
    DeclaredOption::empty(name)
}
