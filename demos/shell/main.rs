//! Script-driven shell over an in-memory root filesystem.
//!
//! Mounts a ramfs, optionally seeds it from a TOML description, then runs
//! a command script through the syscall layer, printing each call's ABI
//! return value. Without a script a short built-in tour runs instead.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use kvfs::dirent::{Dirent, DIRENT_SIZE};
use kvfs::file::OpenFlags;
use kvfs::proc::Proc;
use kvfs::ramfs::Ramfs;
use kvfs::syscall::retval;
use kvfs::vfs::Vfs;

#[derive(Parser)]
#[command(about = "Drive the VFS syscall layer over an in-memory root")]
struct Args {
    /// TOML file naming directories and files to create before running.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Command script, one command per line; `#` starts a comment.
    script: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct Seed {
    #[serde(default)]
    dirs: Vec<String>,
    #[serde(default)]
    files: Vec<SeedFile>,
}

#[derive(Deserialize)]
struct SeedFile {
    path: String,
    data: String,
}

const DEMO_SCRIPT: &str = "\
mkdir /home
cd /home
write notes first line
write notes second line
cat /home/notes
ln /home/notes /home/alias
stat /home/alias
ls /home
rm /home/alias
ls /home
";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let vfs = match Vfs::mount_root(Ramfs::mount(1)) {
        Ok(vfs) => vfs,
        Err(err) => {
            eprintln!("mount failed: {err:?}");
            return ExitCode::FAILURE;
        }
    };
    let proc = Proc::new(vfs);

    if let Some(seed) = &args.seed {
        if let Err(message) = apply_seed(&proc, seed).await {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    }

    let script = match &args.script {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(script) => script,
            Err(err) => {
                eprintln!("cannot read {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => DEMO_SCRIPT.to_owned(),
    };

    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        run_line(&proc, line).await;
    }
    ExitCode::SUCCESS
}

async fn apply_seed(proc: &Proc, path: &std::path::Path) -> Result<(), String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let seed: Seed =
        toml::from_str(&text).map_err(|err| format!("bad seed {}: {err}", path.display()))?;

    for dir in &seed.dirs {
        let ret = retval(proc.mkdir(dir).await);
        if ret < 0 {
            return Err(format!("seed mkdir {dir}: ret {ret}"));
        }
    }
    for file in &seed.files {
        let ret = write_file(proc, &file.path, file.data.as_bytes()).await;
        if ret < 0 {
            return Err(format!("seed write {}: ret {ret}", file.path));
        }
    }
    Ok(())
}

async fn write_file(proc: &Proc, path: &str, data: &[u8]) -> i64 {
    let fd = match proc.open(path, OpenFlags::CREAT | OpenFlags::WRONLY | OpenFlags::APPEND).await
    {
        Ok(fd) => fd,
        Err(err) => return retval::<i32>(Err(err)),
    };
    let ret = retval(proc.write(fd, data).await);
    let closed = retval(proc.close(fd).await);
    if ret < 0 {
        ret
    } else if closed < 0 {
        closed
    } else {
        ret
    }
}

async fn run_line(proc: &Proc, line: &str) {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or_default();
    let first = parts.next();
    let second = parts.next();

    let ret = match (command, first, second) {
        ("mkdir", Some(path), None) => retval(proc.mkdir(path).await),
        ("rmdir", Some(path), None) => retval(proc.rmdir(path).await),
        ("rm", Some(path), None) => retval(proc.unlink(path).await),
        ("cd", Some(path), None) => retval(proc.chdir(path).await),
        ("ln", Some(from), Some(to)) => retval(proc.link(from, to).await),
        ("mv", Some(old), Some(new)) => retval(proc.rename(old, new).await),
        ("create", Some(path), None) => match proc.open(path, OpenFlags::CREAT).await {
            Ok(fd) => retval(proc.close(fd).await),
            Err(err) => retval::<i32>(Err(err)),
        },
        ("write", Some(path), Some(data)) => write_file(proc, path, data.as_bytes()).await,
        ("cat", Some(path), None) => cat(proc, path).await,
        ("ls", Some(path), None) => ls(proc, path).await,
        ("stat", Some(path), None) => match proc.stat(path).await {
            Ok(stat) => {
                println!(
                    "  ino {} type {:?} len {} nlink {}",
                    stat.ino, stat.file_type, stat.len, stat.nlink
                );
                0
            }
            Err(err) => retval::<usize>(Err(err)),
        },
        _ => {
            eprintln!("? {line}");
            return;
        }
    };
    println!("{line} -> {ret}");
}

async fn cat(proc: &Proc, path: &str) -> i64 {
    let fd = match proc.open(path, OpenFlags::RDONLY).await {
        Ok(fd) => fd,
        Err(err) => return retval::<i32>(Err(err)),
    };
    let mut total = 0i64;
    let mut buf = [0u8; 256];
    loop {
        match proc.read(fd, &mut buf).await {
            Ok(0) => break,
            Ok(read) => {
                print!("{}", String::from_utf8_lossy(&buf[..read]));
                total += read as i64;
            }
            Err(err) => {
                let _ = proc.close(fd).await;
                return retval::<usize>(Err(err));
            }
        }
    }
    println!();
    let _ = proc.close(fd).await;
    total
}

async fn ls(proc: &Proc, path: &str) -> i64 {
    let fd = match proc.open(path, OpenFlags::RDONLY).await {
        Ok(fd) => fd,
        Err(err) => return retval::<i32>(Err(err)),
    };
    // Entries cross the ABI as encoded records.
    let mut entry = Dirent::default();
    let mut record = [0u8; DIRENT_SIZE];
    loop {
        match proc.getdent(fd, &mut entry).await {
            Ok(0) => break,
            Ok(_) => {
                let decoded = match entry.encode(&mut record).and_then(|_| Dirent::decode(&record))
                {
                    Ok(decoded) => decoded,
                    Err(err) => {
                        let _ = proc.close(fd).await;
                        return retval::<usize>(Err(err));
                    }
                };
                println!("  {:>4}  {}", decoded.ino, decoded.name);
            }
            Err(err) => {
                let _ = proc.close(fd).await;
                return retval::<usize>(Err(err));
            }
        }
    }
    let _ = proc.close(fd).await;
    0
}
