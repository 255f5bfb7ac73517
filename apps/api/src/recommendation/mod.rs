// Career recommendation: course rules, timeline assembly, and the
// regenerate-or-return policy the HTTP layer calls into.

pub mod handlers;
pub mod rules;
pub mod service;
pub mod timeline;
