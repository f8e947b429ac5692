//! Prompt templates for symptom analysis and healthcare tips.

const SYMPTOM_ANALYSIS: &str = r#"As a medical AI assistant, analyze the following symptoms and provide:
1. Possible conditions (from most to least likely)
2. Severity level (Low/Medium/High)
3. First-aid advice and home remedies
4. Whether immediate medical attention is needed
5. Preventive measures

Symptoms: {symptoms}

Format the response as JSON with the following structure:
{
    "conditions": [{"name": "", "likelihood": ""}],
    "severity": "",
    "immediate_attention": true/false,
    "first_aid": [],
    "home_remedies": [],
    "preventive_measures": []
}
"#;

const HEALTHCARE_TIPS: &str = r#"Provide personalized healthcare tips based on the following conditions and symptoms:

Conditions: {conditions}
Symptoms: {symptoms}

Focus on:
1. Lifestyle modifications
2. Diet recommendations
3. Exercise suggestions
4. Warning signs to watch for

Format as a JSON list of tips.
"#;

/// Renders the analysis prompt.
pub fn symptom_analysis(symptoms: &str) -> String {
    SYMPTOM_ANALYSIS.replace("{symptoms}", symptoms)
}

/// Renders the tips prompt. Conditions are listed as a JSON array.
pub fn healthcare_tips(conditions: &[String], symptoms: &str) -> String {
    let conditions = serde_json::to_string(conditions).unwrap_or_else(|_| "[]".into());
    HEALTHCARE_TIPS
        .replace("{conditions}", &conditions)
        .replace("{symptoms}", symptoms)
}
