use crate::{AuthResponse, Credentials, NewProduct, Product, ProductId};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached and a 401 means the session is no longer valid.
    const AUTHENTICATED: bool = true;

    /// The URL path, relative to the API origin.
    fn path(&self) -> String;

    /// Query string pairs, unencoded.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// List all products
#[derive(Debug, Serialize)]
pub struct ListProducts;

impl ApiRequest for ListProducts {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/products".to_string()
    }
}

/// Keyword search over product names
#[derive(Debug, Serialize)]
pub struct SearchProducts {
    pub keyword: String,
}

impl ApiRequest for SearchProducts {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/products/search".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("keyword", self.keyword.clone())]
    }
}

/// Fetch a single product.
///
/// The backend answers an unknown id with an empty `200`, hence the `Option`.
#[derive(Debug, Serialize)]
pub struct GetProduct {
    pub id: ProductId,
}

impl ApiRequest for GetProduct {
    type Response = Option<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/products/{}", self.id)
    }
}

/// Create a new product (re-uses NewProduct as the body)
impl ApiRequest for NewProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/addProducts".to_string()
    }
}

/// Log in with existing credentials
#[derive(Debug, Serialize)]
pub struct Login(pub Credentials);

impl ApiRequest for Login {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/login".to_string()
    }
}

/// Create an account
#[derive(Debug, Serialize)]
pub struct Signup(pub Credentials);

impl ApiRequest for Signup {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/api/signup".to_string()
    }
}
