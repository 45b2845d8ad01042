use leptos::*;

use crate::state::resources::{Bicycles, Employees, ResourceStore, Routes, Shifts};

/// One store per backend collection, shared by the management sections so
/// cross-section reads (shift forms listing employees and bicycles) reuse
/// the same cache.
#[derive(Clone)]
pub struct ManagementViewModel {
    pub employees: ResourceStore<Employees>,
    pub bicycles: ResourceStore<Bicycles>,
    pub routes: ResourceStore<Routes>,
    pub shifts: ResourceStore<Shifts>,
}

impl ManagementViewModel {
    pub fn new() -> Self {
        Self {
            employees: ResourceStore::new(),
            bicycles: ResourceStore::new(),
            routes: ResourceStore::new(),
            shifts: ResourceStore::new(),
        }
    }
}

pub fn use_management_view_model() -> ManagementViewModel {
    match use_context::<ManagementViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = ManagementViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}
