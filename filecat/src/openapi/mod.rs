//! OpenAPI documentation for the file catalog API.
//!
//! The document is served as JSON at `/openapi.json` and rendered with Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::files::upload_file,
        api::handlers::files::delete_file,
        api::handlers::files::add_tags,
        api::handlers::files::remove_tags,
        api::handlers::files::search_files,
    ),
    components(schemas(
        api::models::files::FileUploadRequest,
        api::models::files::UploadResponse,
        api::models::files::StatusResponse,
        api::models::files::FileResponse,
        api::models::files::FilePageResponse,
    )),
    tags(
        (name = "files", description = "Store file metadata, edit tags, and search by tags and name.

Tags are exact-match labels. A search for several tags returns only records carrying every one of them."),
    ),
    info(
        title = "File Catalog API",
        version = "1.0.0",
        description = "Metadata catalog for uploaded files.

## Errors

Failed requests return a JSON body with `success: false` and a human-readable `error`:

```json
{ \"success\": false, \"error\": \"file not found\" }
```",
    ),
)]
pub struct ApiDoc;
