#![no_std]

extern crate alloc;

mod dirent;
mod error;
mod fs;
mod path;
mod stat;

pub use self::{
    dirent::{DirEntry, FileType},
    error::Error,
    fs::FileSystem,
    path::Path,
    stat::Stat,
};
