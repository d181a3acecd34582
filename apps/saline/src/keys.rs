use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use saline_sodium::{FixedBytes, Sodium};

/// Characters tolerated between hex digits in key and ciphertext files.
const HEX_WHITESPACE: &str = " \t\r\n";

pub fn key_paths(out_dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        out_dir.join(format!("{name}.key")),
        out_dir.join(format!("{name}.pub")),
    )
}

/// Writes `secret` (and `public`, when the primitive has one) as hex files.
///
/// Secret files get mode 0600 on unix.
pub fn write_key_files(
    sodium: &Sodium,
    out_dir: &Path,
    name: &str,
    force: bool,
    secret: &[u8],
    public: Option<&[u8]>,
) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let (key_path, pub_path) = key_paths(out_dir, name);

    if !force && (key_path.exists() || (public.is_some() && pub_path.exists())) {
        return Err(anyhow!("key files already exist (use --force to overwrite)"));
    }

    let mut secret_hex = sodium.utils.bin2hex(secret).into_bytes();
    let written = fs::write(&key_path, &secret_hex);
    sodium.utils.zero(&mut secret_hex);
    written.with_context(|| format!("failed to write {}", key_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&key_path, fs::Permissions::from_mode(0o600))?;
    }

    println!("generated:");
    println!("  secret: {}", key_path.display());

    if let Some(public) = public {
        fs::write(&pub_path, sodium.utils.bin2hex(public))
            .with_context(|| format!("failed to write {}", pub_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&pub_path, fs::Permissions::from_mode(0o644))?;
        }

        println!("  public: {}", pub_path.display());
    }

    Ok(())
}

/// Decodes a hex string, tolerating whitespace anywhere in it.
pub fn decode_hex(sodium: &Sodium, text: &str, origin: &str) -> Result<Vec<u8>> {
    sodium
        .utils
        .hex2bin(text, Some(HEX_WHITESPACE))
        .with_context(|| format!("invalid hex in {origin}"))
}

pub fn load_hex_bytes(sodium: &Sodium, path: &Path) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    decode_hex(sodium, &s, &path.display().to_string())
}

/// Loads a fixed-size key from a hex file; the intermediate buffer is wiped.
pub fn load_key<T: FixedBytes>(sodium: &Sodium, path: &Path) -> Result<T> {
    let mut bytes = load_hex_bytes(sodium, path)?;
    let key = T::from_slice(&bytes);
    sodium.utils.zero(&mut bytes);
    key.with_context(|| format!("wrong key in {}", path.display()))
}

/// Raw bytes from `path`, or stdin when no path (or `-`) is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match path {
        Some(p) if p != Path::new("-") => {
            buf = fs::read(p).with_context(|| format!("failed to read {}", p.display()))?;
        }
        _ => {
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
        }
    }
    Ok(buf)
}

pub fn read_hex_input(sodium: &Sodium, path: Option<&Path>) -> Result<Vec<u8>> {
    let raw = read_input(path)?;
    let text = String::from_utf8(raw).context("input is not hex text")?;
    let origin = path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
    decode_hex(sodium, &text, &origin)
}

/// Opens `path` (or stdin) for chunked reads.
pub fn open_reader(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = fs::File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin())),
    }
}
