#![forbid(unsafe_code)]
//! Rota Sábado — moteur de rotation de binômes du samedi (sans BD).
//!
//! - Cycle de binômes équitable dérivé des membres actifs.
//! - Index ancré sur une année de référence : une date donne toujours le même binôme.
//! - Comptage de charge pour l'audit d'équité.
//! - Régénération qui ne touche jamais aux samedis modifiés ou annulés.
//! - Aucune horloge interne : « aujourd'hui » est toujours passé par l'appelant.

pub mod config;
pub mod io;
pub mod model;
pub mod notification;
pub mod rotation;
pub mod storage;

pub use config::RotaConfig;
pub use model::{Assignment, AssignmentStatus, Member, MemberId, Pair, PairCycle, Roster};
pub use notification::{prepare_reminder, Reminder, ReminderRenderer, TextReminder};
pub use rotation::{
    count_load, generate_pairs, plan, AnchorCalendar, LoadCounts, PlanningHorizon,
    RegenerationReport, Rota, RotaError,
};
pub use storage::{JsonStorage, Storage};
