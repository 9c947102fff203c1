//! PillPal Demo
//!
//! Walks the clinic workflow end to end against the seeded in-memory
//! store: registration, check-in, reception calling the next patient,
//! the doctor closing the consultation, and the printable prescription.

use clap::{Parser, Subcommand};
use colored::*;

use pillpal_model::{Gender, MedicineEntry, PatientRegistration, Role, Vitals};
use pillpal_print::render_prescription;
use pillpal_store::{ClinicStore, StoreEvent};

#[derive(Parser)]
#[command(name = "pillpal-demo")]
#[command(about = "PillPal clinic workflow demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full registration-to-prescription walkthrough
    Walkthrough,

    /// Print the seeded sample prescription
    Print {
        /// Prescription id
        #[arg(short, long, default_value = "1")]
        id: u64,
    },

    /// Dump the seeded store state as JSON
    Dump,
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    println!("{}", "=".repeat(60).cyan());
    println!("{}", "  PILLPAL CLINIC WORKFLOW".cyan().bold());
    println!("{}", "=".repeat(60).cyan());
    println!();

    match cli.command {
        Commands::Walkthrough => run_walkthrough(),
        Commands::Print { id } => print_prescription(id),
        Commands::Dump => dump_state(),
    }
}

fn run_walkthrough() {
    let mut store = ClinicStore::with_seed_data();
    let mut reception_view = store.subscribe();
    let mut doctor_view = store.subscribe();

    println!("{}", "-- Patient registration".green().bold());
    let patient = store
        .register_patient(PatientRegistration {
            name: "John Doe".to_string(),
            phone: "9876549999".to_string(),
            age: 32,
            gender: Gender::Male,
            self_reported_history: "Seasonal allergies".to_string(),
            blood_group: None,
        })
        .expect("registration cannot reference missing records");
    println!("registered {} as {}", patient.name, patient.id.bold());

    println!();
    println!("{}", "-- Check-in".green().bold());
    let doctor_id = store.doctors()[0].id.clone();
    let entry = store
        .add_to_queue(&patient.id, &doctor_id)
        .expect("seeded doctor exists");
    println!("queue entry #{} is {}", entry.id, entry.status.to_string().bold());

    println!();
    println!("{}", "-- Reception".green().bold());
    store
        .login(Role::Receptionist, None)
        .expect("receptionist is seeded");
    drain_events("reception", &mut reception_view, &store);
    let called = store
        .call_next_patient()
        .expect("transition is valid")
        .expect("queue is not empty");
    println!(
        "called patient {} to doctor {}",
        called.patient_id.bold(),
        called.doctor_id.bold()
    );

    println!();
    println!("{}", "-- Consultation".green().bold());
    drain_events("doctor", &mut doctor_view, &store);
    store.login(Role::Doctor, None).expect("doctor is seeded");
    let outcome = store
        .complete_consultation(
            called.queue_id,
            "Mild fever",
            Vitals {
                blood_pressure: Some("120/80".to_string()),
                temperature_c: Some(38.1),
                ..Default::default()
            },
            vec![MedicineEntry {
                name: "Tab. Paracetamol 500mg".to_string(),
                dosage: "1-0-1".to_string(),
                frequency: "After food".to_string(),
                duration: "3 days".to_string(),
            }],
        )
        .expect("entry is in consultation");
    println!(
        "consultation closed, prescription #{} issued",
        outcome.prescription.id
    );

    println!();
    println!("{}", "-- Printable prescription".green().bold());
    let doctor = store.doctor(&doctor_id).expect("seeded doctor");
    let page = render_prescription(
        doctor,
        store.hospital_profile(&doctor_id),
        store.patient(&called.patient_id).expect("registered above"),
        &outcome.prescription,
    );
    println!("{}", page);

    println!("{}", "-- History feed".green().bold());
    for item in store.patient_history(&called.patient_id) {
        println!("  {} ({})", item.title, item.recorded_at.format("%d-%m-%Y"));
    }
}

fn print_prescription(id: u64) {
    let store = ClinicStore::with_seed_data();

    let rx = match store.prescription(id) {
        Some(rx) => rx,
        None => {
            eprintln!("{} no prescription #{}", "error:".red().bold(), id);
            std::process::exit(1);
        }
    };
    let doctor = match store.doctor(&rx.doctor_id) {
        Some(doctor) => doctor,
        None => {
            eprintln!("{} prescription #{} has no doctor", "error:".red().bold(), id);
            std::process::exit(1);
        }
    };
    let patient = match store.patient(&rx.patient_id) {
        Some(patient) => patient,
        None => {
            eprintln!("{} prescription #{} has no patient", "error:".red().bold(), id);
            std::process::exit(1);
        }
    };

    let page = render_prescription(doctor, store.hospital_profile(&rx.doctor_id), patient, rx);
    println!("{}", page);
}

fn dump_state() {
    let store = ClinicStore::with_seed_data();

    let state = serde_json::json!({
        "patients": store.patients(),
        "doctors": store.doctors(),
        "staff": store.staff_members(),
        "queue": store.queue_entries(),
        "prescriptions": store.prescriptions(),
        "history": store.history_items(),
    });

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(1);
        }
    }
}

fn drain_events(view: &str, cursor: &mut pillpal_store::EventCursor, store: &ClinicStore) {
    for event in cursor.catch_up(store) {
        let line = match event {
            StoreEvent::PatientRegistered { patient_id } => {
                format!("patient {} registered", patient_id)
            }
            StoreEvent::QueueEntryAdded {
                queue_id,
                patient_id,
                ..
            } => format!("queue #{}: {} checked in", queue_id, patient_id),
            StoreEvent::QueueStatusChanged { queue_id, from, to } => {
                format!("queue #{}: {} -> {}", queue_id, from, to)
            }
            StoreEvent::PrescriptionIssued {
                prescription_id,
                patient_id,
                ..
            } => format!("prescription #{} for {}", prescription_id, patient_id),
            StoreEvent::HistoryAppended { patient_id, .. } => {
                format!("history item for {}", patient_id)
            }
            StoreEvent::HospitalProfileUpdated { doctor_id } => {
                format!("letterhead updated for {}", doctor_id)
            }
            StoreEvent::SessionChanged { session } => match session {
                Some(session) => format!("session: {} ({})", session.user_id, session.role),
                None => "session cleared".to_string(),
            },
        };
        println!("  {} {}", format!("[{}]", view).yellow(), line);
    }
}
