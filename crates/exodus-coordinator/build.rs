//! Build script: generate a minimal exodus-coordinator man page for packaging.

use std::{env, fs, io, path::PathBuf};
use time::{OffsetDateTime, format_description::well_known::Iso8601};

const FALLBACK_DATE: &str = "1970-01-01";

fn manual_date() -> String {
    let Ok(raw) = env::var("SOURCE_DATE_EPOCH") else {
        return FALLBACK_DATE.into();
    };

    let Ok(ts) = raw.parse::<i64>() else {
        println!(
            "cargo:warning=Ignoring SOURCE_DATE_EPOCH '{raw}': not integer seconds; using \
             {FALLBACK_DATE}"
        );
        return FALLBACK_DATE.into();
    };

    let Ok(stamp) = OffsetDateTime::from_unix_timestamp(ts) else {
        println!(
            "cargo:warning=Ignoring SOURCE_DATE_EPOCH '{raw}': out of range; using \
             {FALLBACK_DATE}"
        );
        return FALLBACK_DATE.into();
    };

    stamp
        .format(&Iso8601::DATE)
        .unwrap_or_else(|_| FALLBACK_DATE.into())
}

/// Locates `target/` by walking up from `OUT_DIR`
/// (`target/{profile}/build/{crate}-{hash}/out`).
fn workspace_target_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR")?);
    out_dir.ancestors().nth(4).map(PathBuf::from)
}

fn man_dir() -> PathBuf {
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".into());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".into());
    workspace_target_dir()
        .unwrap_or_else(|| PathBuf::from("target"))
        .join(format!("generated-man/{target}/{profile}"))
}

fn write_man_page(contents: &str, dir: &std::path::Path, page_name: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let staging = dir.join(format!("{page_name}.tmp"));
    fs::write(&staging, contents)?;
    fs::rename(&staging, dir.join(page_name))
}

fn render(binary_name: &str, version: &str) -> String {
    let title = binary_name.to_uppercase();
    let date = manual_date();
    format!(
        ".TH \"{title}\" \"1\" \"{date}\" \"{binary_name} {version}\" \"Exodus Coordinator\"\n\
.SH NAME\n\
{binary_name} \\- LAN unit registry and relay\n\
.SH SYNOPSIS\n\
.B {binary_name}\n\
[\\fB\\-\\-config\\-path\\fR \\fIFILE\\fR] [\\fB\\-\\-listen\\fR \\fItcp://host:port\\fR]\n\
.SH DESCRIPTION\n\
Accepts unit registrations over HTTP, reports unit liveness, and relays\n\
node listings and sync payloads to registered units.\n\
.SH ENVIRONMENT\n\
Every setting can be supplied as an \\fBEXODUS_\\fR prefixed variable, for\n\
example \\fBEXODUS_LISTEN\\fR or \\fBEXODUS_UNIT_TIMEOUT_SECS\\fR.\n"
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-env-changed=TARGET");
    println!("cargo:rerun-if-env-changed=PROFILE");

    let binary_name = env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "exodus-coordinator".into());
    let version = env::var("CARGO_PKG_VERSION")
        .map_err(|_| "CARGO_PKG_VERSION must be set by Cargo to render the manual page")?;

    let page = render(&binary_name, &version);
    let page_name = format!("{binary_name}.1");
    write_man_page(&page, &man_dir(), &page_name)?;

    if let Some(out_dir) = env::var_os("OUT_DIR") {
        let out_dir = PathBuf::from(out_dir);
        if let Err(error) = write_man_page(&page, &out_dir, &page_name) {
            println!(
                "cargo:warning=Failed to stage manual page in OUT_DIR ({}): {error}",
                out_dir.display()
            );
        }
    }

    Ok(())
}
