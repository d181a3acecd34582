use std::{
    io::{self, BufRead, Read},
    path::PathBuf,
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use saline_sodium::{
    BoxPublicKey, BoxSecretKey, GenericHashKey, PwHashPreset, SecretBoxKey, ShortHashKey,
    SignPublicKey, SignSecretKey, Signature, Sodium,
};

mod keys;

use keys::{load_hex_bytes, load_key, open_reader, read_hex_input, read_input, write_key_files};

/// Streaming hash chunk size.
const HASH_CHUNK: usize = 64 * 1024;

#[derive(Parser)]
#[command(name = "saline", version, about = "libsodium primitives from the command line")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyKind {
    /// Curve25519 key pair for box
    Box,
    /// Ed25519 key pair for signatures
    Sign,
    /// XSalsa20-Poly1305 key
    Secretbox,
    /// BLAKE2b key of the recommended length
    Hash,
    /// SipHash-2-4 key
    Shorthash,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a key (pair) as hex files: <name>.key and, for pairs, <name>.pub
    Keygen {
        #[arg(long, value_enum)]
        kind: KeyKind,

        /// Output directory
        #[arg(long)]
        out_dir: PathBuf,

        /// Prefix for filenames (e.g. "alice" -> alice.key / alice.pub)
        #[arg(long)]
        name: String,

        /// Overwrite existing files
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Encrypt to a recipient; prints nonce || mac || ciphertext as hex
    Seal {
        /// Recipient public key file
        #[arg(long)]
        to: PathBuf,

        /// Sender secret key file; omit for an anonymous sealed box
        #[arg(long)]
        from: Option<PathBuf>,

        /// Plaintext file (stdin when absent)
        input: Option<PathBuf>,
    },

    /// Decrypt a box read as hex; writes the plaintext to stdout
    Open {
        /// Recipient secret key file; <key>.pub must sit next to it for anonymous boxes
        #[arg(long)]
        key: PathBuf,

        /// Sender public key file; omit for an anonymous sealed box
        #[arg(long)]
        from: Option<PathBuf>,

        input: Option<PathBuf>,
    },

    /// Encrypt with a shared secret key; prints nonce || mac || ciphertext as hex
    SecretboxSeal {
        #[arg(long)]
        key: PathBuf,

        input: Option<PathBuf>,
    },

    /// Decrypt a secret box read as hex
    SecretboxOpen {
        #[arg(long)]
        key: PathBuf,

        input: Option<PathBuf>,
    },

    /// Sign a message; prints the detached signature (or signed message with --attached) as hex
    Sign {
        #[arg(long)]
        key: PathBuf,

        #[arg(long, default_value_t = false)]
        attached: bool,

        input: Option<PathBuf>,
    },

    /// Check a detached signature; exits non-zero when it does not verify
    Verify {
        #[arg(long)]
        public_key: PathBuf,

        /// Signature as hex
        #[arg(long)]
        signature: String,

        input: Option<PathBuf>,
    },

    /// Verify a signed message read as hex and print the embedded message
    SignOpen {
        #[arg(long)]
        public_key: PathBuf,

        input: Option<PathBuf>,
    },

    /// BLAKE2b digest of a file or stdin, computed incrementally
    Hash {
        /// Optional key file
        #[arg(long)]
        key: Option<PathBuf>,

        /// Digest length in bytes (16..=64)
        #[arg(long, default_value_t = 32)]
        len: usize,

        input: Option<PathBuf>,
    },

    /// SipHash-2-4 digest of a file or stdin
    Shorthash {
        #[arg(long)]
        key: PathBuf,

        input: Option<PathBuf>,
    },

    /// Hash a password read from the first line of stdin into a storable string
    PwhashStr {
        #[arg(long, env = "SALINE_PWHASH_PRESET", default_value_t = PwHashPreset::Interactive)]
        preset: PwHashPreset,
    },

    /// Check a password read from stdin against a stored hash string
    PwhashVerify {
        /// Encoded hash as produced by pwhash-str
        #[arg(long)]
        hash: String,

        /// Also report whether the hash is weaker than this preset
        #[arg(long, env = "SALINE_PWHASH_PRESET")]
        preset: Option<PwHashPreset>,
    },

    /// Print random bytes as hex
    Random {
        #[arg(long, default_value_t = 32)]
        len: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let sodium = Sodium::new().context("failed to initialize libsodium")?;

    match cli.cmd {
        Command::Keygen { kind, out_dir, name, force } => run_keygen(&sodium, kind, out_dir, name, force),
        Command::Seal { to, from, input } => run_seal(&sodium, to, from, input),
        Command::Open { key, from, input } => run_open(&sodium, key, from, input),
        Command::SecretboxSeal { key, input } => run_secretbox_seal(&sodium, key, input),
        Command::SecretboxOpen { key, input } => run_secretbox_open(&sodium, key, input),
        Command::Sign { key, attached, input } => run_sign(&sodium, key, attached, input),
        Command::Verify { public_key, signature, input } => run_verify(&sodium, public_key, signature, input),
        Command::SignOpen { public_key, input } => run_sign_open(&sodium, public_key, input),
        Command::Hash { key, len, input } => run_hash(&sodium, key, len, input),
        Command::Shorthash { key, input } => run_shorthash(&sodium, key, input),
        Command::PwhashStr { preset } => run_pwhash_str(&sodium, preset),
        Command::PwhashVerify { hash, preset } => run_pwhash_verify(&sodium, hash, preset),
        Command::Random { len } => {
            println!("{}", sodium.utils.bin2hex(&sodium.random_bytes.buf(len)));
            Ok(())
        }
    }
}

fn run_keygen(sodium: &Sodium, kind: KeyKind, out_dir: PathBuf, name: String, force: bool) -> Result<()> {
    match kind {
        KeyKind::Box => {
            let kp = sodium.crypto_box.key_pair()?;
            write_key_files(sodium, &out_dir, &name, force, kp.secret_key.as_bytes(), Some(&kp.public_key.0[..]))
        }
        KeyKind::Sign => {
            let kp = sodium.sign.key_pair()?;
            write_key_files(sodium, &out_dir, &name, force, kp.secret_key.as_bytes(), Some(&kp.public_key.0[..]))
        }
        KeyKind::Secretbox => {
            let key = sodium.secret_box.key();
            write_key_files(sodium, &out_dir, &name, force, key.as_bytes(), None)
        }
        KeyKind::Hash => {
            let key = sodium.generic_hash.key()?;
            write_key_files(sodium, &out_dir, &name, force, key.as_bytes(), None)
        }
        KeyKind::Shorthash => {
            let key = sodium.short_hash.key();
            write_key_files(sodium, &out_dir, &name, force, key.as_bytes(), None)
        }
    }
}

fn run_seal(sodium: &Sodium, to: PathBuf, from: Option<PathBuf>, input: Option<PathBuf>) -> Result<()> {
    let recipient: BoxPublicKey = load_key(sodium, &to)?;
    let message = read_input(input.as_deref())?;

    let sealed = match from {
        Some(from) => {
            let sender: BoxSecretKey = load_key(sodium, &from)?;
            sodium.crypto_box.seal(&message, &recipient, &sender)?
        }
        None => sodium.crypto_box.seal_anonymous(&message, &recipient)?,
    };
    debug!(message_len = message.len(), sealed_len = sealed.len(), "box sealed");

    println!("{}", sodium.utils.bin2hex(&sealed));
    Ok(())
}

fn run_open(sodium: &Sodium, key: PathBuf, from: Option<PathBuf>, input: Option<PathBuf>) -> Result<()> {
    let secret: BoxSecretKey = load_key(sodium, &key)?;
    let sealed = read_hex_input(sodium, input.as_deref())?;

    let message = match from {
        Some(from) => {
            let sender: BoxPublicKey = load_key(sodium, &from)?;
            sodium.crypto_box.open(&sealed, &sender, &secret)
        }
        None => {
            let own: BoxPublicKey = load_key(sodium, &key.with_extension("pub"))?;
            sodium.crypto_box.open_anonymous(&sealed, &own, &secret)
        }
    }
    .context("box did not open")?;
    debug!(sealed_len = sealed.len(), message_len = message.len(), "box opened");

    write_stdout(&message)
}

fn run_secretbox_seal(sodium: &Sodium, key: PathBuf, input: Option<PathBuf>) -> Result<()> {
    let key: SecretBoxKey = load_key(sodium, &key)?;
    let message = read_input(input.as_deref())?;
    let sealed = sodium.secret_box.seal(&message, &key)?;
    debug!(message_len = message.len(), sealed_len = sealed.len(), "secret box sealed");

    println!("{}", sodium.utils.bin2hex(&sealed));
    Ok(())
}

fn run_secretbox_open(sodium: &Sodium, key: PathBuf, input: Option<PathBuf>) -> Result<()> {
    let key: SecretBoxKey = load_key(sodium, &key)?;
    let sealed = read_hex_input(sodium, input.as_deref())?;
    let message = sodium.secret_box.open(&sealed, &key).context("secret box did not open")?;

    write_stdout(&message)
}

fn run_sign(sodium: &Sodium, key: PathBuf, attached: bool, input: Option<PathBuf>) -> Result<()> {
    let secret: SignSecretKey = load_key(sodium, &key)?;
    let message = read_input(input.as_deref())?;

    let out = if attached {
        sodium.sign.sign(&message, &secret)?
    } else {
        sodium.sign.signature(&message, &secret)?.0.to_vec()
    };
    debug!(message_len = message.len(), attached, "message signed");

    println!("{}", sodium.utils.bin2hex(&out));
    Ok(())
}

fn run_verify(sodium: &Sodium, public_key: PathBuf, signature: String, input: Option<PathBuf>) -> Result<()> {
    let public: SignPublicKey = load_key(sodium, &public_key)?;
    let signature = keys::decode_hex(sodium, &signature, "--signature")?;
    let signature = Signature::try_from(signature.as_slice()).context("wrong signature length")?;
    let message = read_input(input.as_deref())?;

    if !sodium.sign.verify(&message, &public, &signature) {
        return Err(anyhow!("signature does not verify"));
    }
    info!("signature ok");
    println!("ok");
    Ok(())
}

fn run_sign_open(sodium: &Sodium, public_key: PathBuf, input: Option<PathBuf>) -> Result<()> {
    let public: SignPublicKey = load_key(sodium, &public_key)?;
    let signed = read_hex_input(sodium, input.as_deref())?;
    let message = sodium.sign.open(&signed, &public).context("signature does not verify")?;

    write_stdout(&message)
}

fn run_hash(sodium: &Sodium, key: Option<PathBuf>, len: usize, input: Option<PathBuf>) -> Result<()> {
    let key = key
        .map(|path| {
            let mut raw = load_hex_bytes(sodium, &path)?;
            let key = GenericHashKey::from_slice(&raw);
            sodium.utils.zero(&mut raw);
            key.with_context(|| format!("wrong key in {}", path.display()))
        })
        .transpose()?;

    let mut stream = sodium
        .generic_hash
        .init_stream(key.as_ref().map(|k| k.as_bytes()), Some(len))?;

    let mut reader = open_reader(input.as_deref())?;
    let mut chunk = vec![0u8; HASH_CHUNK];
    let mut total = 0usize;
    loop {
        let n = reader.read(&mut chunk).context("read failed")?;
        if n == 0 {
            break;
        }
        stream.update(&chunk[..n])?;
        total += n;
    }
    let digest = stream.finalize()?;
    debug!(bytes = total, digest_len = digest.len(), "hash stream finalized");

    println!("{}", sodium.utils.bin2hex(&digest));
    Ok(())
}

fn run_shorthash(sodium: &Sodium, key: PathBuf, input: Option<PathBuf>) -> Result<()> {
    let key: ShortHashKey = load_key(sodium, &key)?;
    let message = read_input(input.as_deref())?;
    let digest = sodium.short_hash.hash(&message, &key)?;

    println!("{}", sodium.utils.bin2hex(&digest.0));
    Ok(())
}

fn run_pwhash_str(sodium: &Sodium, preset: PwHashPreset) -> Result<()> {
    let mut password = read_password()?;
    debug!(%preset, "hashing password");
    let encoded = sodium.pw_hash.hash_str_with_preset(&password, preset);
    sodium.utils.zero(&mut password);

    println!("{}", encoded?);
    Ok(())
}

fn run_pwhash_verify(sodium: &Sodium, hash: String, preset: Option<PwHashPreset>) -> Result<()> {
    let mut password = read_password()?;
    let ok = sodium.pw_hash.verify_str(&hash, &password);
    sodium.utils.zero(&mut password);

    if !ok {
        return Err(anyhow!("password does not match"));
    }
    println!("ok");

    if let Some(preset) = preset {
        if sodium.pw_hash.needs_rehash(&hash, preset.ops_limit(), preset.mem_limit())? {
            println!("needs rehash for preset {preset}");
        }
    }
    Ok(())
}

/// First line of stdin, without its line terminator.
fn read_password() -> Result<Vec<u8>> {
    let mut line = Vec::new();
    io::stdin()
        .lock()
        .read_until(b'\n', &mut line)
        .context("failed to read password from stdin")?;
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
    Ok(line)
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let mut out = io::stdout().lock();
    out.write_all(bytes).context("failed to write stdout")?;
    out.flush().context("failed to flush stdout")
}
