mod supervisor;

pub(crate) mod support;
