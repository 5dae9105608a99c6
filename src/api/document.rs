use serde::{Deserialize, Serialize};

/// API root payload, only the parts we use
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    pub refs: Vec<Ref>,
}

impl ApiInfo {
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ref {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// One page of search results
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub results_size: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
    pub results: Vec<Document>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub document_type: String,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: DocumentData,
}

/// Fields requested with `fetch`; absent ones come back empty
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "page": 1,
            "results_per_page": 1,
            "results_size": 1,
            "total_results_size": 2,
            "total_pages": 2,
            "next_page": "https://blog.cdn.prismic.io/api/v2/documents/search?ref=X&page=2&pageSize=1",
            "prev_page": null,
            "results": [{
                "id": "YF0x",
                "uid": "como-utilizar-hooks",
                "type": "post",
                "first_publication_date": "2021-03-15T19:25:28+0000",
                "last_publication_date": "2021-03-25T19:25:28+0000",
                "tags": [],
                "data": {
                    "title": "Como utilizar Hooks",
                    "subtitle": "Pensando em sincronização em vez de ciclos de vida",
                    "author": "Joseph Oliveira"
                }
            }]
        }"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_pages, 2);
        assert!(response.next_page.is_some());
        assert_eq!(response.results.len(), 1);
        let doc = &response.results[0];
        assert_eq!(doc.uid.as_deref(), Some("como-utilizar-hooks"));
        assert_eq!(doc.document_type, "post");
        assert_eq!(doc.data.author, "Joseph Oliveira");
    }

    #[test]
    fn test_partial_data_defaults_to_empty() {
        let json = r#"{"next_page": null, "results": [{"id": "a", "data": {"title": "Only title"}}]}"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let doc = &response.results[0];
        assert_eq!(doc.uid, None);
        assert_eq!(doc.data.title, "Only title");
        assert_eq!(doc.data.subtitle, "");
    }

    #[test]
    fn test_master_ref() {
        let json = r#"{"refs": [
            {"id": "preview", "ref": "P1", "label": "Preview", "isMasterRef": false},
            {"id": "master", "ref": "M1", "label": "Master", "isMasterRef": true}
        ]}"#;
        let info: ApiInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.master_ref(), Some("M1"));
    }
}
