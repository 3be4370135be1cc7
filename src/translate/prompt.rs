/// Fixed instruction template sent to every provider.
pub fn build_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "You are a professional translator. Translate the user's text strictly from {source_lang} to {target_lang}.

Text:
\"\"\"
{text}
\"\"\"

Rules:
- Output only the translated text, no quotes, no explanations.
- Preserve formatting and punctuation."
    )
}
