#![allow(dead_code, reason = "Not every test binary uses every helper")]
pub use egui::accesskit::Role;
pub use egui_kittest::{
    Harness, Node,
    kittest::{NodeT as _, Queryable as _},
};

/// Disabled state lives on the underlying AccessKit node
pub trait NodeExt {
    fn is_disabled(&self) -> bool;
}

impl NodeExt for Node<'_> {
    fn is_disabled(&self) -> bool {
        egui_kittest::kittest::NodeT::accesskit_node(self).is_disabled()
    }
}

pub fn get_harness() -> Harness<'static, geotrace::App> {
    Harness::new_eframe(|cc| geotrace::App::new(cc))
}

pub struct HarnessWrapper {
    harness: Harness<'static, geotrace::App>,
}

impl HarnessWrapper {
    pub fn new() -> Self {
        let mut harness = Self {
            harness: get_harness(),
        };
        harness.step();
        harness
    }

    /// Runs a single frame. The map requests repaints while tiles load, so `run` would not settle.
    pub fn step(&mut self) {
        self.harness.step();
    }

    /// Button whose label ends with `text`, side menu entries are prefixed with an icon
    pub fn get_button<'a>(&'a self, text: &'a str) -> Node<'a> {
        self.harness.get_by(move |n| {
            n.role() == Role::Button && n.label().is_some_and(|l| l.ends_with(text))
        })
    }

    pub fn click_button(&mut self, text: &str) {
        self.get_button(text).click();
        self.step();
        self.step();
    }

    /// Any node whose label contains `text`
    pub fn has_label_containing(&self, text: &str) -> bool {
        self.harness.query_all_by_label_contains(text).next().is_some()
    }

    pub fn has_label(&self, text: &str) -> bool {
        self.harness.query_by_label(text).is_some()
    }
}
