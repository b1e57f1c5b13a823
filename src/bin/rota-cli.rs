#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rota_sabado::{
    io,
    model::{Member, MemberId, Roster},
    notification::{prepare_reminder, TextReminder},
    rotation::{assignments_in_month, back_to_back_counts, upcoming},
    storage::{JsonStorage, Storage},
    RotaConfig,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de rotation des binômes du samedi (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON (membres + assignations)
    #[arg(long, global = true, default_value = "rota.json")]
    roster: String,

    /// Fichier JSON de configuration (ancrage, horizon)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Date du jour (YYYY-MM-DD), horloge système par défaut
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre
    AddMember {
        #[arg(long)]
        name: String,
        /// 2 caractères
        #[arg(long)]
        label: String,
        #[arg(long)]
        color: String,
        /// Identifiant stable (aléatoire si absent)
        #[arg(long)]
        id: Option<String>,
    },

    /// Importer des membres depuis un CSV
    ImportMembers {
        #[arg(long)]
        csv: String,
    },

    /// Activer ou désactiver un membre
    SetActive {
        #[arg(long)]
        id: String,
        #[arg(long)]
        active: String,
    },

    /// Afficher le cycle de binômes courant
    Pairs,

    /// Régénérer les samedis planifiés jusqu'à la fin de l'horizon
    Generate,

    /// Lister et optionnellement exporter
    List {
        /// Samedis non annulés à partir de cette date
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Vue mensuelle (YYYY-MM)
        #[arg(long, conflicts_with = "from")]
        month: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Modifier le binôme d'un samedi
    Edit {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        first: String,
        #[arg(long)]
        second: String,
        #[arg(long)]
        note: Option<String>,
    },

    /// Annuler un samedi
    Cancel {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        note: Option<String>,
    },

    /// Histogramme de charge et écart à l'équité
    Load,

    /// Générer un rappel texte pour un membre
    Notify {
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 2)]
        days_before: i64,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = match &cli.config {
        Some(path) => RotaConfig::load_from_file(path)?,
        None => RotaConfig::default(),
    };
    let today = cli.today.unwrap_or_else(|| Utc::now().date_naive());

    let storage = JsonStorage::open(&cli.roster)?;
    let roster = if storage.exists() {
        storage.load()?
    } else {
        Roster::default()
    };
    let mut rota = config.rota(roster);

    let code = match cli.cmd {
        Commands::AddMember {
            name,
            label,
            color,
            id,
        } => {
            let id = id.map(MemberId::new).unwrap_or_else(MemberId::random);
            let member = Member::with_id(id.clone(), name, label, color);
            rota.add_members(vec![member])?;
            storage.save(rota.roster())?;
            println!("{id}");
            0
        }
        Commands::ImportMembers { csv } => {
            let members = io::import_members_csv(csv)?;
            rota.add_members(members)?;
            storage.save(rota.roster())?;
            0
        }
        Commands::SetActive { id, active } => {
            let active = io::parse_bool(&active).context("--active")?;
            rota.set_active(&MemberId::new(id), active)?;
            storage.save(rota.roster())?;
            0
        }
        Commands::Pairs => {
            let cycle = rota.pair_cycle();
            if cycle.is_empty() {
                println!(
                    "{} active member(s), fewer than 2: no pairs",
                    rota.roster().active_members().count()
                );
            }
            for (i, pair) in cycle.iter().enumerate() {
                println!(
                    "{} | {} + {}",
                    i + 1,
                    rota.roster().seat_label(Some(pair.first())),
                    rota.roster().seat_label(Some(pair.second()))
                );
            }
            let b2b = back_to_back_counts(&cycle);
            for (id, count) in &b2b {
                println!("back-to-back {} = {}", rota.roster().seat_label(Some(id)), count);
            }
            0
        }
        Commands::Generate => {
            let report = rota.regenerate(today, config.horizon_end);
            storage.save(rota.roster())?;
            println!(
                "{} inserted, {} replaced, {} preserved, {} removed",
                report.inserted, report.replaced, report.preserved, report.removed
            );
            0
        }
        Commands::List {
            from,
            month,
            out_json,
            out_csv,
        } => {
            if let Some(path) = out_json {
                io::export_roster_json(path, rota.roster())?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, rota.roster())?;
            }
            let roster = rota.roster();
            let rows = match (from, month) {
                (Some(day), _) => upcoming(&roster.assignments, day, usize::MAX),
                (None, Some(month)) => {
                    let first = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
                        .with_context(|| format!("invalid month: {month}"))?;
                    assignments_in_month(&roster.assignments, first.year(), first.month())
                }
                (None, None) => roster.assignments.iter().collect(),
            };
            // impression compacte
            for a in rows {
                println!(
                    "{} | {} + {} | {}{}",
                    a.date,
                    roster.seat_label(a.first.as_ref()),
                    roster.seat_label(a.second.as_ref()),
                    a.status,
                    a.note.as_deref().map(|n| format!(" | {n}")).unwrap_or_default()
                );
            }
            0
        }
        Commands::Edit {
            date,
            first,
            second,
            note,
        } => {
            rota.modify_assignment(date, &MemberId::new(first), &MemberId::new(second), note)?;
            storage.save(rota.roster())?;
            0
        }
        Commands::Cancel { date, note } => {
            rota.cancel_assignment(date, note)?;
            storage.save(rota.roster())?;
            0
        }
        Commands::Load => {
            let report = rota.equity();
            for line in &report {
                println!(
                    "{:<24} {:>3} ({:>5.1}%) drift {:+.1}",
                    line.name,
                    line.count,
                    line.share * 100.0,
                    line.drift
                );
            }
            // Code 2 = WARNING : écart de plus d'un samedi à la cible
            if report.iter().any(|l| l.drift.abs() > 1.0) {
                eprintln!("equity drift above one saturday");
                2
            } else {
                0
            }
        }
        Commands::Notify {
            id,
            days_before,
            out,
        } => {
            let renderer = TextReminder;
            let reminder = prepare_reminder(
                rota.roster(),
                &MemberId::new(id),
                days_before,
                today,
                &renderer,
            )?;
            std::fs::write(&out, reminder.content)?;
            println!(
                "Reminder generated for {} (saturday {}) on {}",
                reminder.member_id, reminder.date, reminder.notice_on
            );
            0
        }
    };

    std::process::exit(code);
}
