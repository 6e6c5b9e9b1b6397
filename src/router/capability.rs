//! Capability slots: the operations a resource chooses to expose.

use std::fmt;

/// The five REST actions a resource can support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    Show,
    Create,
    Update,
    Destroy,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of independently optional handler slots for one resource.
///
/// Not every resource exposes every action; an index-only or show-only
/// resource is a first-class citizen. Built with chainable setters:
///
/// ```ignore
/// let capability = Capability::new().index(list_members).show(show_member);
/// ```
#[derive(Debug, Clone)]
pub struct Capability<H> {
    index: Option<H>,
    show: Option<H>,
    create: Option<H>,
    update: Option<H>,
    destroy: Option<H>,
}

impl<H> Capability<H> {
    pub fn new() -> Self {
        Self {
            index: None,
            show: None,
            create: None,
            update: None,
            destroy: None,
        }
    }

    pub fn index(mut self, handler: H) -> Self {
        self.index = Some(handler);
        self
    }

    pub fn show(mut self, handler: H) -> Self {
        self.show = Some(handler);
        self
    }

    pub fn create(mut self, handler: H) -> Self {
        self.create = Some(handler);
        self
    }

    pub fn update(mut self, handler: H) -> Self {
        self.update = Some(handler);
        self
    }

    pub fn destroy(mut self, handler: H) -> Self {
        self.destroy = Some(handler);
        self
    }

    /// True when no slot is occupied. Registering an empty capability is a
    /// configuration error.
    pub fn is_empty(&self) -> bool {
        self.index.is_none()
            && self.show.is_none()
            && self.create.is_none()
            && self.update.is_none()
            && self.destroy.is_none()
    }

    /// Consumes the capability, yielding its occupied slots.
    pub(crate) fn into_slots(self) -> impl Iterator<Item = (Action, H)> {
        [
            (Action::Index, self.index),
            (Action::Show, self.show),
            (Action::Create, self.create),
            (Action::Update, self.update),
            (Action::Destroy, self.destroy),
        ]
        .into_iter()
        .filter_map(|(action, slot)| slot.map(|handler| (action, handler)))
    }
}

impl<H> Default for Capability<H> {
    fn default() -> Self {
        Self::new()
    }
}
