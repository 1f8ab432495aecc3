//! tests/common.rs
//! Fernet fixtures and helpers shared across test files

#![allow(dead_code)] // each test binary uses a different subset

use bullcrypt::{
    Algorithm, AlgorithmOptions, CollectingSink, Fernet, FernetOptions, Mode, Options,
    Orchestrator, PlaintextEncoding, Summary,
};
use std::path::{Path, PathBuf};

/// Plaintext of [`TOKEN`].
pub const PLAINTEXT: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const KEY: &str = "eBUADWmyqd8diJhRb2Kps6ZMbDqzLOXj2_6ILmFs-sE=";

/// Valid keys that do not open [`TOKEN`].
pub const WRONG_KEYS: [&str; 2] = [
    "57ndyQKDwbYrkLKXkT0zPBaIpyfSNktkaWk7HOz_WC8=",
    "b_aUzNmDOHKF2A7rO7wVZzMF3_CDTui7obSLtthYmUk=",
];

/// A second pair of keys that open nothing in these fixtures.
pub const UNRELATED_KEYS: [&str; 2] = [
    "JRwWHzueILiaAJjf6xiZBhKG4WCw_e28QUVhdW4J8zk=",
    "UGOR3EkupTjl4tfpEstGKx1oxBarx8UAbVS_tHemorw=",
];

pub const TOKEN: &str = "gAAAAABo7pXag6KIWBdtlWUhl_qnc17dk4bJ4-mI_f4oxpBCLQc7sMacXD5XIP7v2sJctAQJDDJvo7hmCby0zBOG3rIfV2D2ZvirH-kSmX9rrvkk5dB7sUhvJUP6B7qG_xAaWzx823_5";

/// [`TOKEN`] wrapped across four lines.
pub const TOKEN_WRAPPED: &str = "gAAAAABo7pXag6KIWBdtlWUhl_qnc17dk4b\n\
J4-mI_f4oxpBCLQc7sMacXD5XIP7v2sJctA\n\
QJDDJvo7hmCby0zBOG3rIfV2D2ZvirH-kSm\n\
X9rrvkk5dB7sUhvJUP6B7qG_xAaWzx823_5\n";

/// [`TOKEN`] base64-encoded once more, wrapped across four lines.
pub const TOKEN_BASE64_WRAPPED: &str = "Z0FBQUFBQm83cFhhZzZLSVdCZHRsV1VobF9xbmMxN2RrNGJ\n\
KNC1tSV9mNG94cEJDTFFjN3NNYWNYRDVYSVA3djJzSmN0QV\n\
FKRERKdm83aG1DYnkwekJPRzNySWZWMkQyWnZpckgta1NtW\n\
DlycnZrazVkQjdzVWh2SlVQNkI3cUdfeEFhV3p4ODIzXzU=";

/// Key for the line-mode fixture.
pub const LINE_KEY: &str = "8KAadjX51CrZ5NCX0JVKculskzYmkHYE3C_f8N4clpo=";

/// Two tokens separated by blank lines; they open to [`LINE_PLAINTEXTS`].
pub const LINE_FILE: &str = "\n\n\n\
gAAAAABo7pkfKtJjd-uivjf9HgdiEEPsNNV5sh--5oQ0NVEB86hOokPix6AIPLFJIxrW1TQjmzq3b4sXxlOQh3Rhnby1pvKwxer2wUZTIGO2EtYbL0Ppn-Q=\n\n\
gAAAAABo7pkvZzIsEg3wQOhQuDzuYZEWrsD0_t4HuQG2IDlzkOjuwgaWg5R5rYtpETCYGOiNdYCmPFJ2p2xPVuJnc8qas5ZK9A==";

pub const LINE_PLAINTEXTS: [&str; 2] = ["ABCDEFGHIJKLMNOPQRSTUVWXYZ", "0123456789"];

/// Fernet options holding `keys`, in order.
pub fn fernet_options(keys: &[&str]) -> AlgorithmOptions {
    AlgorithmOptions::new(FernetOptions::new(keys.iter().copied()).unwrap())
}

pub fn options(
    mode: Mode,
    plaintext_encoding: Option<PlaintextEncoding>,
    keys: &[&str],
) -> Options {
    Options::builder()
        .with_mode(mode)
        .with_plaintext_encoding(plaintext_encoding)
        .with_algorithm_options(Some(fernet_options(keys)))
        .build()
        .unwrap()
}

pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Run [`Fernet`] over `paths` and keep everything the sink received.
pub fn run_fernet<P: AsRef<Path>>(options: &Options, paths: &[P]) -> (Summary, CollectingSink) {
    run_with(&Fernet, options, paths)
}

pub fn run_with<P: AsRef<Path>>(
    algorithm: &dyn Algorithm,
    options: &Options,
    paths: &[P],
) -> (Summary, CollectingSink) {
    let mut sink = CollectingSink::new();
    let summary = Orchestrator::new(algorithm, options).run(paths, &mut sink);
    (summary, sink)
}

/// Resolved plaintexts as UTF-8 strings, in sink order.
pub fn resolved_texts(sink: &CollectingSink) -> Vec<String> {
    sink.resolved()
        .map(|(_, plaintext)| String::from_utf8(plaintext.to_vec()).unwrap())
        .collect()
}
