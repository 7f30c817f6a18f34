//! Consultation CLI commands

use clap::Subcommand;

use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{ConsultationId, ConsultationStatus};
use crate::services::{ConsultationService, CreateConsultationInput};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_id};

/// Consultation subcommands
#[derive(Subcommand)]
pub enum ConsultationCommands {
    /// Record a consultation
    Add {
        /// Patient name
        patient: String,
        /// Consultation date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// What was discussed
        #[arg(short, long)]
        content: Option<String>,
        /// Quoted treatment cost
        #[arg(short, long)]
        quote: Option<String>,
    },
    /// Update a consultation's status
    Status {
        /// Consultation ID
        id: String,
        /// New status (pending/accepted/declined)
        status: String,
    },
    /// Delete a consultation
    Delete {
        /// Consultation ID
        id: String,
    },
    /// List consultations
    List,
}

/// Handle a consultation command
pub fn handle_consultation_command(
    storage: &Storage,
    cmd: ConsultationCommands,
) -> ChairsideResult<()> {
    let service = ConsultationService::new(storage);

    match cmd {
        ConsultationCommands::Add {
            patient,
            date,
            content,
            quote,
        } => {
            let consultation = service.create(CreateConsultationInput {
                patient_name: patient,
                date: parse_date(&date)?,
                content: content.unwrap_or_default(),
                quoted_amount: quote.as_deref().map(parse_amount).transpose()?,
            })?;

            println!("Recorded consultation: {}", consultation.patient_name);
            println!("  ID: {}", consultation.id);
        }

        ConsultationCommands::Status { id, status } => {
            let id: ConsultationId = parse_id(&id, "Consultation")?;
            let status = match status.as_str() {
                "pending" | "상담중" => ConsultationStatus::Pending,
                "accepted" | "동의" => ConsultationStatus::Accepted,
                "declined" | "비동의" => ConsultationStatus::Declined,
                other => {
                    return Err(ChairsideError::Validation(format!(
                        "Invalid status: '{}'. Valid statuses: pending, accepted, declined",
                        other
                    )))
                }
            };

            let updated = service.set_status(id, status)?;
            println!("{}: {}", updated.patient_name, updated.status);
        }

        ConsultationCommands::Delete { id } => {
            let id: ConsultationId = parse_id(&id, "Consultation")?;
            let removed = service.delete(id)?;
            println!("Deleted consultation: {} ({})", removed.patient_name, removed.id);
        }

        ConsultationCommands::List => {
            let consultations = service.list()?;
            if consultations.is_empty() {
                println!("No consultations found.");
            }
            for c in consultations {
                let quote = c
                    .quoted_amount
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} {:12} {:20} {:6} {}",
                    c.date.format("%Y-%m-%d"),
                    c.id.to_string(),
                    c.patient_name,
                    c.status.to_string(),
                    quote
                );
            }
        }
    }

    Ok(())
}
