use serde_json::Value;

/// Build the summarization prompt for a resolved article record.
///
/// The record goes in verbatim as JSON; the provider is asked to find the
/// body text itself since feed items mix metadata and content freely.
pub fn build_summary_prompt(article: &Value) -> String {
    format!(
        "The following JSON describes a news article. \
If the main body text of the article can be distinguished from its metadata \
(such as the source, author, image or publish date), extract it. \
Summarize the article in 5-6 lines of plain prose. \
If no main body text can be distinguished, summarize the most detailed field available.\n\n\
Article:\n{article:#}\n\nSummary:"
    )
}
