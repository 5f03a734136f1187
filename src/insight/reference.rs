/// Canonical reference range for a lab test, keyed by normalized name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEntry {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

const fn entry(min: f64, max: f64, unit: &'static str) -> ReferenceEntry {
    ReferenceEntry { min, max, unit }
}

/// Standard adult reference ranges for common panels: hematology, metabolic,
/// renal, hepatic, lipid, electrolyte, thyroid. Process-lifetime constant;
/// reports may carry their own bounds but these take precedence.
const COMMON_LAB_REFERENCES: &[(&str, ReferenceEntry)] = &[
    ("hemoglobin", entry(12.0, 17.5, "g/dL")),
    ("hematocrit", entry(36.0, 46.0, "%")),
    ("wbc", entry(4.5, 11.0, "K/uL")),
    ("rbc", entry(4.5, 5.9, "M/uL")),
    ("platelets", entry(150.0, 400.0, "K/uL")),
    ("glucose", entry(70.0, 100.0, "mg/dL")),
    ("glucose_fasting", entry(70.0, 100.0, "mg/dL")),
    ("creatinine", entry(0.7, 1.3, "mg/dL")),
    ("bun", entry(7.0, 20.0, "mg/dL")),
    ("sodium", entry(136.0, 145.0, "mEq/L")),
    ("potassium", entry(3.5, 5.0, "mEq/L")),
    ("calcium", entry(8.5, 10.2, "mg/dL")),
    ("phosphorus", entry(2.5, 4.5, "mg/dL")),
    ("magnesium", entry(1.7, 2.2, "mg/dL")),
    ("albumin", entry(3.5, 5.0, "g/dL")),
    ("total_protein", entry(6.0, 8.3, "g/dL")),
    ("ast", entry(10.0, 40.0, "U/L")),
    ("alt", entry(7.0, 56.0, "U/L")),
    ("alkaline_phosphatase", entry(44.0, 147.0, "U/L")),
    ("total_bilirubin", entry(0.1, 1.2, "mg/dL")),
    ("ldl", entry(0.0, 100.0, "mg/dL")),
    ("hdl", entry(40.0, 300.0, "mg/dL")),
    ("triglycerides", entry(0.0, 150.0, "mg/dL")),
    ("total_cholesterol", entry(0.0, 200.0, "mg/dL")),
    ("tsh", entry(0.4, 4.0, "mIU/L")),
];

/// Lookup table for canonical lab reference ranges.
pub struct LabReferenceTable {
    entries: &'static [(&'static str, ReferenceEntry)],
}

impl LabReferenceTable {
    /// The built-in table (~25 common panels).
    pub fn builtin() -> Self {
        Self {
            entries: COMMON_LAB_REFERENCES,
        }
    }

    /// Look up a reference range by normalized test name.
    pub fn get(&self, normalized_name: &str) -> Option<&ReferenceEntry> {
        self.entries
            .iter()
            .find(|(name, _)| *name == normalized_name)
            .map(|(_, entry)| entry)
    }

    /// All entries, in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &ReferenceEntry)> {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LabReferenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Layperson description for a normalized test name, for the voice agent's
/// reference-range tool.
pub fn describe(normalized_name: &str) -> &'static str {
    match normalized_name {
        "hemoglobin" => "Protein in red blood cells that carries oxygen throughout the body",
        "hematocrit" => "Percentage of red blood cells in total blood volume",
        "wbc" => "White blood cells that help fight infections",
        "rbc" => "Red blood cells that carry oxygen",
        "platelets" => "Blood cells that help with clotting",
        "glucose" => "Blood sugar level",
        "glucose_fasting" => "Blood sugar level after fasting",
        "creatinine" => "Kidney function marker",
        "bun" => "Kidney function marker (blood urea nitrogen)",
        "sodium" => "Electrolyte important for nerve and muscle function",
        "potassium" => "Electrolyte important for heart and muscle function",
        "calcium" => "Mineral important for bones and teeth",
        "phosphorus" => "Mineral important for bone health",
        "magnesium" => "Mineral important for muscle and nerve function",
        "albumin" => "Protein that helps maintain blood pressure and transport nutrients",
        "total_protein" => "Total amount of proteins in blood",
        "ast" => "Liver enzyme (aspartate aminotransferase)",
        "alt" => "Liver enzyme (alanine aminotransferase)",
        "alkaline_phosphatase" => "Enzyme related to liver and bone health",
        "total_bilirubin" => "Waste product from red blood cell breakdown",
        "ldl" => "Low-density lipoprotein (bad cholesterol)",
        "hdl" => "High-density lipoprotein (good cholesterol)",
        "triglycerides" => "Type of fat in blood",
        "total_cholesterol" => "Total amount of cholesterol in blood",
        "tsh" => "Thyroid stimulating hormone (thyroid function)",
        _ => "Lab value",
    }
}
