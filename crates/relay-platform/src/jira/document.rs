//! Issue payload construction
//!
//! Descriptions use the Atlassian document format: the quoted message text
//! followed by a link back to the originating conversation.

use relay_core::IssueRequest;
use serde_json::{json, Map, Value};

/// Rich-text description quoting the message and linking to its source
pub fn description_document(quoted_text: &str, source_link: &str) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "blockquote",
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": quoted_text}]
                }]
            },
            {
                "type": "paragraph",
                "content": [
                    {"type": "text", "text": "\nSlack message link: "},
                    {
                        "type": "text",
                        "text": "here",
                        "marks": [{"type": "link", "attrs": {"href": source_link}}]
                    }
                ]
            }
        ]
    })
}

/// The `fields` object of an issue creation request
///
/// Assignee, reporter and sprint are left out when unresolved.
pub fn issue_fields(request: &IssueRequest, sprint_field: &str) -> Value {
    let mut fields = Map::new();
    fields.insert("project".into(), json!({"key": request.project_key}));
    fields.insert("summary".into(), json!(request.summary));
    fields.insert(
        "description".into(),
        description_document(&request.quoted_text, &request.source_link),
    );
    fields.insert("issuetype".into(), json!({"name": request.issue_type}));
    fields.insert("parent".into(), json!({"key": request.parent_key}));

    if let Some(account_id) = &request.assignee_account_id {
        fields.insert("assignee".into(), json!({"accountId": account_id}));
    }
    if let Some(account_id) = &request.reporter_account_id {
        fields.insert("reporter".into(), json!({"accountId": account_id}));
    }
    if let Some(iteration) = request.iteration_id {
        fields.insert(sprint_field.to_string(), json!(iteration));
    }

    Value::Object(fields)
}
