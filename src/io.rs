use crate::model::{Member, MemberId, Roster};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import de membres depuis CSV: header `id,name,label,color[,active]`
///
/// Un `id` vide reçoit un identifiant aléatoire.
pub fn import_members_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Member>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        let label = rec.get(2).context("missing label")?.trim();
        let color = rec.get(3).context("missing color")?.trim();
        if name.is_empty() || color.is_empty() {
            bail!("invalid member row (empty)");
        }
        let id = if id.is_empty() {
            MemberId::random()
        } else {
            MemberId::new(id)
        };
        let mut member = Member::with_id(id, name, label, color);
        if !member.has_valid_label() {
            bail!("label must be 2 characters for member {name}");
        }
        if let Some(flag) = rec.get(4) {
            let flag = flag.trim();
            if !flag.is_empty() {
                member.active = parse_bool(flag)
                    .with_context(|| format!("invalid active value for member {name}"))?;
            }
        }
        out.push(member);
    }
    Ok(out)
}

pub fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" | "si" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des assignations: header `date,first,second,status,note`
pub fn export_assignments_csv<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_assignments_csv(file, roster)
}

pub fn write_assignments_csv<W: Write>(writer: W, roster: &Roster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(writer);
    w.write_record(["date", "first", "second", "status", "note"])?;
    for a in &roster.assignments {
        let date = a.date.to_string();
        w.write_record([
            date.as_str(),
            a.first.as_ref().map(MemberId::as_str).unwrap_or(""),
            a.second.as_ref().map(MemberId::as_str).unwrap_or(""),
            a.status.as_str(),
            a.note.as_deref().unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}
