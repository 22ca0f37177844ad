//! OpenAPI 3.0 description of the read API
//!
//! Served at `/openapi.json` and written to disk by `cargo xtask openapi`.

use serde_json::{json, Value};

use crate::models::Platform;

pub fn openapi_document() -> Value {
    let platforms: Vec<&str> = Platform::ALL.iter().map(Platform::as_str).collect();

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Duel",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Advocacy engagement and sales read API"
        },
        "servers": [
            { "url": "http://localhost:3000", "description": "Local server" }
        ],
        "paths": {
            "/engagement": {
                "get": {
                    "summary": "Get engagement metrics for a platform",
                    "parameters": [{
                        "in": "query",
                        "name": "platform",
                        "required": true,
                        "schema": { "type": "string", "enum": platforms },
                        "description": "Social platform"
                    }],
                    "responses": {
                        "200": {
                            "description": "Engagement metrics",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Engagement" }
                                }
                            }
                        },
                        "400": error_response("Missing or unsupported platform"),
                        "500": error_response("Failed to fetch engagement totals")
                    }
                }
            },
            "/top-users": {
                "get": {
                    "summary": "Get top 10 users by total sales attributed",
                    "responses": {
                        "200": {
                            "description": "List of top users",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/TopUser" }
                                    }
                                }
                            }
                        },
                        "500": error_response("Failed to fetch top users")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Engagement": {
                    "type": "object",
                    "properties": {
                        "likes": { "type": "integer", "description": "Number of likes" },
                        "comments": { "type": "integer", "description": "Number of comments" },
                        "shares": { "type": "integer", "description": "Number of shares" }
                    },
                    "required": ["likes", "comments", "shares"]
                },
                "TopUser": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "nullable": true },
                        "email": { "type": "string", "nullable": true },
                        "instagramHandle": { "type": "string", "nullable": true },
                        "tiktokHandle": { "type": "string", "nullable": true },
                        "totalSalesAttributed": { "type": "number" }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": { "error": { "type": "string" } },
                    "required": ["error"]
                }
            }
        }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Error" }
            }
        }
    })
}
