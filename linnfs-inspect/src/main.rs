mod block_file;
mod cli;

use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use linnfs::LinnFileSystem;
use storage::Storage;
use typed_bytesize::ByteSizeIec;

pub use self::{
    block_file::BlockFile,
    cli::{Cli, Command},
};

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::info!("image={:?}", cli.image);

    let storage: Arc<dyn Storage> = Arc::new(BlockFile::new(File::open(&cli.image)?)?);
    let fs = LinnFileSystem::mount(storage).map_err(|e| io::Error::other(e.to_string()))?;

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Super => {
            let sb = fs.super_block();
            writeln!(
                stdout,
                "revision:     {}.{}",
                sb.major_revision, sb.minor_revision
            )?;
            writeln!(stdout, "block size:   {}", ByteSizeIec(sb.block_size as u64))?;
            writeln!(
                stdout,
                "inodes:       {} used / {}",
                sb.used_inodes(),
                sb.inodes_count
            )?;
            writeln!(
                stdout,
                "blocks:       {} used / {}",
                sb.used_blocks(),
                sb.blocks_count
            )?;
            writeln!(stdout, "groups:       {}", fs.volume().groups().len())?;
            writeln!(
                stdout,
                "volume size:  {}",
                ByteSizeIec(sb.blocks_count * sb.block_size as u64)
            )?;
        }
        Command::Ls { path } => {
            for entry in fs.read_dir(&path).map_err(fs_err(&path))? {
                writeln!(stdout, "{:>8} {:<10} {}", entry.inode, entry.ty, entry.name)?;
            }
        }
        Command::Stat { path } => {
            let cache = fs.lookup_file(&path).map_err(fs_err(&path))?;
            let stat = cache.file().stat(fs.volume());
            let inode = cache.file().inode();
            writeln!(stdout, "inode:  {}", stat.inode)?;
            writeln!(stdout, "type:   {}", stat.mode)?;
            writeln!(stdout, "size:   {} ({})", stat.size, ByteSizeIec(stat.size))?;
            writeln!(stdout, "blocks: {} of {}", stat.blocks, stat.block_size)?;
            writeln!(stdout, "mode:   {:o} {:?}", inode.mode, inode.permissions())?;
            writeln!(stdout, "links:  {}", inode.links)?;
            writeln!(stdout, "owner:  {}:{}", inode.uid, inode.gid)?;
        }
        Command::Cat { path } => {
            let mut buf = vec![0u8; fs.volume().block_size() as usize];
            let mut offset = 0;
            loop {
                let n = fs.read_file(&path, offset, &mut buf).map_err(fs_err(&path))?;
                if n == 0 {
                    break;
                }
                stdout.write_all(&buf[..n])?;
                offset += n as u64;
            }
        }
    }

    Ok(())
}

fn fs_err(path: &str) -> impl Fn(vfs::Error) -> io::Error + '_ {
    move |e| {
        let kind = match e {
            vfs::Error::NotFound => io::ErrorKind::NotFound,
            vfs::Error::Unsupported => io::ErrorKind::Unsupported,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, format!("{path}: {e}"))
    }
}
