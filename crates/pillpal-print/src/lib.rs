//! Printable prescription pages.
//!
//! Renders a prescription as a fixed-width text page: clinic letterhead,
//! doctor identity, patient row, vitals, diagnosis, the Rx table, a
//! signature block, and the disclaimer. Section order and content follow
//! the clinic's printed form; the exact byte layout is not a contract.

use pillpal_model::{Doctor, HospitalProfile, Patient, Prescription};

/// Page width in characters.
const PAGE_WIDTH: usize = 72;

// Rx table column widths: No. / Medicine / Dosage / Timing / Duration.
const COL_NO: usize = 4;
const COL_MEDICINE: usize = 30;
const COL_DOSAGE: usize = 10;
const COL_TIMING: usize = 16;

/// Render a prescription as a printable page.
///
/// When the doctor has no hospital profile yet, the letterhead falls back
/// to the default hospital name and skips the contact lines.
pub fn render_prescription(
    doctor: &Doctor,
    profile: Option<&HospitalProfile>,
    patient: &Patient,
    rx: &Prescription,
) -> String {
    let mut page = String::new();

    // ----- letterhead -----
    let hospital_name = profile
        .map(|p| p.hospital_name.as_str())
        .unwrap_or("My Hospital");
    page.push_str(&hospital_name.to_uppercase());
    page.push('\n');
    if let Some(profile) = profile {
        if let Some(address) = &profile.address {
            page.push_str(address);
            page.push('\n');
        }
        if let Some(phone) = &profile.phone {
            page.push_str(&format!("Phone: {}\n", phone));
        }
        if let Some(website) = &profile.website {
            page.push_str(&format!("Website: {}\n", website));
        }
    }

    // ----- doctor block -----
    page.push('\n');
    page.push_str(&right_align(&doctor.name));
    page.push_str(&right_align(&doctor.qualifications));
    page.push_str(&right_align(&doctor.specialty));
    page.push_str(&rule());

    // ----- patient row -----
    page.push_str(&format!(
        "Patient: {} ({})    Age/Sex: {}/{}    Date: {}\n",
        patient.name,
        patient.id,
        patient.age,
        patient.gender.code(),
        rx.created_at.format("%d-%m-%Y"),
    ));
    page.push_str(&format!("Phone: {}\n", patient.phone));

    // ----- vitals -----
    if !rx.vitals.is_empty() {
        page.push('\n');
        page.push_str("Vitals:\n");
        for (label, value) in rx.vitals.entries() {
            page.push_str(&format!("  {}: {}\n", label, value));
        }
    }

    // ----- diagnosis -----
    page.push('\n');
    page.push_str("Diagnosis:\n");
    page.push_str(&format!("  {}\n", rx.diagnosis));

    // ----- medicines -----
    page.push('\n');
    page.push_str("Rx\n");
    page.push_str(&format!(
        "{:<no$}{:<med$}{:<dose$}{:<time$}{}\n",
        "No.",
        "Medicine",
        "Dosage",
        "Timing",
        "Duration",
        no = COL_NO,
        med = COL_MEDICINE,
        dose = COL_DOSAGE,
        time = COL_TIMING,
    ));
    for (i, med) in rx.medicines.iter().enumerate() {
        page.push_str(&format!(
            "{:<no$}{:<med$}{:<dose$}{:<time$}{}\n",
            i + 1,
            med.name,
            med.dosage,
            med.frequency,
            med.duration,
            no = COL_NO,
            med = COL_MEDICINE,
            dose = COL_DOSAGE,
            time = COL_TIMING,
        ));
    }

    // ----- signature -----
    page.push('\n');
    page.push('\n');
    page.push_str(&right_align("Doctor's Signature"));
    page.push_str(&rule());

    // ----- disclaimer -----
    page.push_str("NOTE: This prescription is generated for the mentioned patient only.\n");
    page.push_str("Consult your doctor before taking any medication.\n");

    page
}

fn right_align(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("{:>width$}\n", text, width = PAGE_WIDTH)
}

fn rule() -> String {
    format!("{}\n", "-".repeat(PAGE_WIDTH))
}
