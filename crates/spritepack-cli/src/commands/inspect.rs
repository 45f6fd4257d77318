//! Inspect command implementation
//!
//! Read-only listing of a resource store: buckets, keys, digests and decoded
//! records.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use spritepack_picture::CompressedPicture;
use spritepack_spec::{AnimationRecord, SpritesheetRecord, TagRecord, TextureRecord};
use spritepack_store::{codec, Bucket, BucketRead, ResourceStore, StoreOptions};
use std::path::Path;
use std::process::ExitCode;

use super::reporting::short_digest;

/// JSON report for `inspect --json`.
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    /// Store path as given.
    pub store: String,
    /// One entry per listed bucket.
    pub buckets: Vec<BucketReport>,
}

/// Contents of one bucket.
#[derive(Debug, Serialize)]
pub struct BucketReport {
    pub name: &'static str,
    pub present: bool,
    pub keys: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub entries: Vec<EntryReport>,
}

/// One decoded key.
#[derive(Debug, Serialize)]
pub struct EntryReport {
    pub key: String,
    pub bytes: usize,
    pub value: Value,
    /// One-line description for human output.
    #[serde(skip)]
    pub summary: String,
}

/// A stored value decoded according to its bucket.
#[derive(Debug)]
enum Record {
    Picture(CompressedPicture),
    Spritesheet(SpritesheetRecord),
    Texture(TextureRecord),
    Animation(AnimationRecord),
    Tag(TagRecord),
}

impl Record {
    fn decode(bucket: Bucket, bytes: &[u8]) -> Result<Self> {
        Ok(match bucket {
            // Embedded stores keep pictures here, indexed stores keep cell sizes.
            Bucket::Spritesheets => match codec::decode::<CompressedPicture>(bytes) {
                Ok(picture) => Record::Picture(picture),
                Err(_) => Record::Spritesheet(codec::decode(bytes)?),
            },
            Bucket::Textures => Record::Texture(codec::decode(bytes)?),
            Bucket::Pictures => Record::Picture(codec::decode(bytes)?),
            Bucket::Animations => {
                let record: AnimationRecord = codec::decode(bytes)?;
                if !record.is_consistent() {
                    anyhow::bail!(
                        "animation record has {} frames but {} durations",
                        record.frames().len(),
                        record.durations().len()
                    );
                }
                Record::Animation(record)
            }
            Bucket::Tags => Record::Tag(codec::decode(bytes)?),
        })
    }

    fn to_json(&self) -> Value {
        match self {
            Record::Picture(p) => json!({
                "width": p.width,
                "height": p.height,
                "runs": p.runs.len(),
            }),
            Record::Spritesheet(s) => json!({ "width": s.width, "height": s.height }),
            Record::Texture(t) => json!({ "picture": t.picture }),
            Record::Animation(a) => json!({
                "spritesheet": a.spritesheet,
                "texture": a.texture,
                "frames": a.frames().iter().map(|f| [f.x, f.y, f.w, f.h]).collect::<Vec<_>>(),
                "durations": a.durations(),
            }),
            Record::Tag(names) => json!(names),
        }
    }

    fn summary(&self) -> String {
        match self {
            Record::Picture(p) => {
                format!("{}x{} picture, {} runs", p.width, p.height, p.runs.len())
            }
            Record::Spritesheet(s) => format!("{}x{} cells", s.width, s.height),
            Record::Texture(t) => format!("-> picture '{}'", t.picture),
            Record::Animation(a) => {
                let texture = a
                    .texture
                    .as_deref()
                    .map(|t| format!(" via '{}'", t))
                    .unwrap_or_default();
                format!(
                    "{}{}: {} frames, {} ticks",
                    a.spritesheet,
                    texture,
                    a.len(),
                    a.total_duration()
                )
            }
            Record::Tag(names) => names.join(", "),
        }
    }
}

/// Run the inspect command
///
/// # Arguments
/// * `store_path` - Resource store to open
/// * `bucket` - Only list this bucket
/// * `json_output` - Whether to output machine-readable JSON
/// * `options` - Store open options
pub fn run(
    store_path: &Path,
    bucket: Option<Bucket>,
    json_output: bool,
    options: StoreOptions,
) -> Result<ExitCode> {
    if !store_path.is_file() {
        anyhow::bail!("resource store not found: {}", store_path.display());
    }
    let store = ResourceStore::open_with(store_path, &options)
        .with_context(|| format!("Failed to open {}", store_path.display()))?;

    let output = collect(&store, store_path, bucket)?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(&output);
    }
    Ok(ExitCode::SUCCESS)
}

/// Reads every requested bucket in one read transaction.
pub fn collect(
    store: &ResourceStore,
    store_path: &Path,
    only: Option<Bucket>,
) -> Result<InspectOutput> {
    let txn = store.read()?;
    let buckets: Vec<Bucket> = match only {
        Some(bucket) => vec![bucket],
        None => Bucket::ALL.to_vec(),
    };

    let mut reports = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        if !txn.has_bucket(bucket)? {
            reports.push(BucketReport {
                name: bucket.name(),
                present: false,
                keys: 0,
                digest: None,
                entries: Vec::new(),
            });
            continue;
        }

        let mut entries = Vec::new();
        for (key, bytes) in txn.entries(bucket)? {
            let record = Record::decode(bucket, &bytes)
                .with_context(|| format!("Failed to decode {}/{}", bucket, key))?;
            entries.push((key, bytes.len(), record));
        }

        reports.push(BucketReport {
            name: bucket.name(),
            present: true,
            keys: entries.len(),
            digest: Some(txn.digest(bucket)?),
            entries: entries
                .into_iter()
                .map(|(key, bytes, record)| EntryReport {
                    key,
                    bytes,
                    value: record.to_json(),
                    summary: record.summary(),
                })
                .collect(),
        });
    }

    Ok(InspectOutput {
        store: store_path.display().to_string(),
        buckets: reports,
    })
}

fn print_human(output: &InspectOutput) {
    println!("{} {}", "Store:".cyan().bold(), output.store);
    for bucket in &output.buckets {
        let Some(digest) = &bucket.digest else {
            println!("\n{} {}", bucket.name.bold(), "(absent)".dimmed());
            continue;
        };
        println!(
            "\n{} {} {}",
            bucket.name.bold(),
            format!("{} key(s)", bucket.keys).dimmed(),
            format!("blake3 {}", short_digest(digest)).dimmed()
        );
        for entry in &bucket.entries {
            println!("  {} {}", entry.key.green(), entry.summary);
        }
    }
}
