//! Campaign id to display-name lookup.
//!
//! Campaigns live in the external call-center system; this table is the
//! static snapshot the dashboard ships with. Unknown ids fall back to
//! `Campagne {id}`.

/// Known campaigns, keyed by their Diabolocom campaign id.
pub static CAMPAIGNS: &[(&str, &str)] = &[
    ("5927", "Electricien"),
    ("3389", "CPF : Relances CPF"),
    ("2602", "Coaching 2"),
    ("2603", "Coaching 3"),
    ("5659", "Coaching SKETCHUP"),
    ("6083", "CA - Elec MIT MIS"),
    ("5671", "Coaching CFA"),
    ("4118", "Coaching 1 : nouveaux inscrits"),
    ("5920", "CAP MIS"),
    ("6067", "CA - Excel et Formateur"),
    ("6082", "CA - Mode Déco"),
    ("6064", "CA - Titres Professionnels"),
    ("6050", "CA - Céramiste Fleuriste"),
    ("6051", "CA - Métiers de la Beauté"),
    ("6046", "CA - Métiers de Bouche"),
    ("3148", "Campagne A"),
    ("5571", "Test - Conseiller Fleuriste2"),
    ("6016", "CRE : leads autonomes"),
    ("5582", "CRE"),
    ("5921", "CAP MIT"),
    ("5611", "Campagne Mode"),
    ("5622", "Campagne Nutritionniste"),
    ("5621", "Décorateur Intérieur"),
    ("5612", "Métiers Animaliers"),
    ("5580", "Campagne AEPE"),
    ("5617", "Admin apprentissage"),
    ("5600", "Tiers Financement"),
    ("5520", "Recouvrement"),
    ("5534", "Recouvrement v2 test"),
    ("5667", "Resiliation"),
    ("3512", "CONTENTIEUX"),
    ("3511", "COMPTA"),
    ("3510", "ACCORD NON RESPECTÉ"),
];

/// Maximum character length of an abbreviated chart label.
const SHORT_LABEL_MAX: usize = 14;

/// Display name for a campaign id, with the `Campagne {id}` fallback.
pub fn campaign_name(campaign_id: &str) -> String {
    CAMPAIGNS
        .iter()
        .find(|(id, _)| *id == campaign_id)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Campagne {campaign_id}"))
}

/// Abbreviated form of a campaign name for chart axis labels.
///
/// Strips the `CA - ` and `Campagne ` prefixes, caps the length at
/// [`SHORT_LABEL_MAX`] characters, and appends `…` when truncated.
pub fn short_label(name: &str) -> String {
    let stripped = name
        .strip_prefix("CA - ")
        .or_else(|| name.strip_prefix("Campagne "))
        .unwrap_or(name);

    let chars: Vec<char> = stripped.chars().collect();
    if chars.len() <= SHORT_LABEL_MAX {
        stripped.to_string()
    } else {
        let mut out: String = chars[..SHORT_LABEL_MAX].iter().collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_campaign_resolves() {
        assert_eq!(campaign_name("5612"), "Métiers Animaliers");
    }

    #[test]
    fn unknown_campaign_falls_back() {
        assert_eq!(campaign_name("9999"), "Campagne 9999");
    }

    #[test]
    fn short_label_strips_prefixes() {
        assert_eq!(short_label("CA - Mode Déco"), "Mode Déco");
        assert_eq!(short_label("Campagne Mode"), "Mode");
    }

    #[test]
    fn short_label_truncates_with_ellipsis() {
        let label = short_label("CA - Titres Professionnels");
        assert!(label.ends_with('…'));
        assert_eq!(label.chars().count(), SHORT_LABEL_MAX + 1);
    }

    #[test]
    fn short_label_keeps_short_names() {
        assert_eq!(short_label("CRE"), "CRE");
    }
}
