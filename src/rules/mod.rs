//! The built-in Field Pattern Registry.
//!
//! One file per field. Each exposes `rules()` in the order its rules should
//! run; `get` concatenates them field by field.

mod guest_count;
mod helpers;
mod linens;
mod menu;
mod timeline;


use crate::FieldRule;

pub(crate) fn get() -> Vec<FieldRule> {
    let mut rules = guest_count::rules();
    rules.extend(timeline::rules());
    rules.extend(menu::rules());
    rules.extend(linens::rules());
    rules
}
