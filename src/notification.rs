use crate::model::{Assignment, Member, MemberId, Roster};
use crate::rotation::upcoming;
use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};

/// Représente un rappel généré pour un membre.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub member_id: MemberId,
    pub date: NaiveDate,
    pub notice_on: NaiveDate,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, push, etc.).
pub trait ReminderRenderer {
    fn render(
        &self,
        member: &Member,
        partner: Option<&Member>,
        assignment: &Assignment,
        notice_on: NaiveDate,
    ) -> String;
}

/// Gabarit texte simple destiné à une future notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(
        &self,
        member: &Member,
        partner: Option<&Member>,
        assignment: &Assignment,
        notice_on: NaiveDate,
    ) -> String {
        let partner = partner.map(|p| p.name.as_str()).unwrap_or("(place vide)");
        let mut out = format!(
            "Bonjour {name},\n\nTu es de garde le samedi {date} avec {partner}.\n",
            name = member.first_name(),
            date = assignment.date,
        );
        if let Some(note) = &assignment.note {
            out.push_str(&format!("Note : {note}\n"));
        }
        out.push_str(&format!("Ce message est généré le {notice_on}.\n"));
        out
    }
}

/// Prépare un rappel pour le prochain samedi d'un membre.
pub fn prepare_reminder(
    roster: &Roster,
    member_id: &MemberId,
    days_before: i64,
    today: NaiveDate,
    renderer: &dyn ReminderRenderer,
) -> Result<Reminder> {
    if days_before < 0 {
        bail!("days_before must be positive");
    }

    let member = roster
        .find_member(member_id)
        .with_context(|| format!("unknown member: {member_id}"))?;

    let next = upcoming(&roster.assignments, today, usize::MAX)
        .into_iter()
        .find(|a| a.involves(member_id))
        .with_context(|| format!("no upcoming saturday found for member {member_id}"))?;

    let partner = next
        .seats()
        .find(|id| *id != member_id)
        .and_then(|id| roster.find_member(id));

    let notice_on = next.date - Duration::days(days_before);
    let content = renderer.render(member, partner, next, notice_on);
    Ok(Reminder {
        member_id: member.id.clone(),
        date: next.date,
        notice_on,
        content,
    })
}
