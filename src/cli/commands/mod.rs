pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod list;
pub(crate) mod revise;
pub(crate) mod show;
pub(crate) mod stats;
pub(crate) mod transition;
pub(crate) mod update;
