//! Plain-text rendering of contacts.

use crm_core::contact::Contact;

const HEADERS: [&str; 4] = ["Name", "Last name", "Email", "Status"];

/// Placeholder for absent optional values.
const MISSING: &str = "N/A";

fn row(contact: &Contact) -> [String; 4] {
  [
    contact.first_name.clone(),
    contact.last_name.clone().unwrap_or_else(|| MISSING.to_owned()),
    contact.email.clone(),
    contact.status.to_string(),
  ]
}

fn width(s: &str) -> usize { s.chars().count() }

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
  let line = cells
    .iter()
    .zip(widths)
    .map(|(cell, w)| format!("{cell}{}", " ".repeat(w - width(cell))))
    .collect::<Vec<_>>()
    .join("  ");
  out.push_str(line.trim_end());
  out.push('\n');
}

/// Render contacts as an aligned table with a header row.
pub fn render_list(contacts: &[Contact]) -> String {
  if contacts.is_empty() {
    return "No contacts.\n".to_owned();
  }

  let rows: Vec<[String; 4]> = contacts.iter().map(row).collect();
  let mut widths = HEADERS.map(width);
  for r in &rows {
    for (w, cell) in widths.iter_mut().zip(r) {
      *w = (*w).max(width(cell));
    }
  }

  let mut out = String::new();
  push_line(&mut out, &HEADERS, &widths);
  let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
  push_line(
    &mut out,
    &rule.iter().map(String::as_str).collect::<Vec<_>>(),
    &widths,
  );
  for r in &rows {
    push_line(
      &mut out,
      &r.iter().map(String::as_str).collect::<Vec<_>>(),
      &widths,
    );
  }
  out
}

/// Render a single contact as `label: value` lines.
pub fn render_detail(contact: &Contact) -> String {
  let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_owned());

  let mut lines = vec![
    ("Id", contact.id.to_string()),
    ("Name", contact.full_name()),
    ("Email", contact.email.clone()),
    ("Phone", or_missing(&contact.phone)),
    ("WhatsApp", or_missing(&contact.whatsapp)),
    ("Status", contact.status.to_string()),
  ];

  if let Some(p) = &contact.prospecting_info {
    lines.push((
      "Origin",
      p.origin.map(|o| o.to_string()).unwrap_or_else(|| MISSING.to_owned()),
    ));
    lines.push((
      "Lifecycle stage",
      p.lifecycle_stage
        .map(|s| s.to_string())
        .unwrap_or_else(|| MISSING.to_owned()),
    ));
    if !p.prospect_interests.is_empty() {
      let interests: Vec<String> =
        p.prospect_interests.iter().map(ToString::to_string).collect();
      lines.push(("Interests", interests.join(", ")));
    }
  }

  if let Some(s) = &contact.shipping_info {
    let address: Vec<&str> = [
      &s.street,
      &s.neighborhood,
      &s.municipality,
      &s.state,
      &s.postal_code,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .collect();
    if !address.is_empty() {
      lines.push(("Ship to", address.join(", ")));
    }
  }

  lines.push(("Created", contact.created_at.to_rfc3339()));
  lines.push(("Updated", contact.updated_at.to_rfc3339()));

  let label_width = lines.iter().map(|(l, _)| width(l)).max().unwrap_or(0);
  lines
    .into_iter()
    .map(|(label, value)| format!("{label:<label_width$}  {value}\n"))
    .collect()
}
