//! Long-form engineering report built around an image caption.

/// Substituted for the user focus when no prompt was given.
pub const DEFAULT_FOCUS: &str = "General structural safety and condition evaluation.";

/// Shown alongside every generated report.
pub const DISCLAIMER: &str =
    "This report is AI-assisted and must be validated by a qualified civil engineer before implementation.";

/// Render the seven-section markdown report for `caption`.
///
/// An empty `prompt` falls back to [`DEFAULT_FOCUS`]; any other prompt is
/// substituted verbatim.
pub fn generate_engineering_report(caption: &str, prompt: &str) -> String {
    let focus = if prompt.is_empty() { DEFAULT_FOCUS } else { prompt };

    let report = format!(
        r#"
### 1. Overview of the Structure

Based on the uploaded image, the structure can be described as follows:
{caption}. The visible condition of the structure suggests notable concerns from a civil engineering perspective.

### 2. Structural Condition Assessment

From visual inspection, several indicators point toward potential structural distress. These may include damage to load-bearing components, degradation of reinforced concrete elements, and signs of material failure. The observed condition implies that the structure may have experienced excessive loading, poor maintenance, environmental exposure, or extreme external events.

### 3. Possible Causes of Damage

Potential contributing factors include:
- Aging and long-term material deterioration
- Inadequate structural design or construction defects
- Environmental effects such as moisture ingress or corrosion
- Overloading beyond design limits
- Seismic or impact-related forces

### 4. Engineering Interpretation (User Context)

User-requested focus:
{focus}

Considering the above context, the structure exhibits conditions that require professional evaluation. Visual indicators alone are insufficient for final judgment, but they strongly suggest the need for immediate technical attention.

### 5. Safety Evaluation

The current visible state of the structure may pose safety risks to occupants and nearby infrastructure. Falling debris, progressive collapse, or sudden failure are possible if corrective measures are not taken.

### 6. Engineering Recommendations

- Conduct a detailed on-site structural inspection by a licensed civil or structural engineer.
- Perform non-destructive tests (Rebound Hammer, Ultrasonic Pulse Velocity).
- Assess reinforcement corrosion and concrete integrity.
- Restrict access to the structure until safety is verified.
- Plan for strengthening, retrofitting, or demolition based on assessment results.

### 7. Conclusion

This AI-assisted analysis provides an initial understanding of the structure using image-based interpretation combined with engineering reasoning. Final decisions must be based on detailed calculations, field testing, and professional judgment.
"#
    );

    report.trim().to_string()
}
