mod lifecycle;
mod process;
mod spawn;
