use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::{net::TcpListener, sync::Mutex};

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const USER_TOKEN: &str = "tok-user";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Everything the fake backend has been asked, in order.
#[derive(Default)]
pub struct StubState {
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl StubState {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last(&self) -> RecordedCall {
        self.calls().last().cloned().expect("backend was never called")
    }
}

pub fn stored_graduate(id: i64) -> Value {
    json!({
        "id": id,
        "nombre": "Ana",
        "apellido": "Quispe",
        "email": "ana@example.com",
        "carrera": "Ingeniería Industrial",
        "fechaNacimiento": "1996-02-14T00:00:00",
        "fechaIngreso": "2013-03-01",
        "fechaEgreso": "2018-12-20",
        "ponderado": 15.8,
        "idExperienciaLaboral": [
            { "id": 10, "empresa": "Backus", "cargo": "Practicante", "fechaIngreso": "2018-01-08", "fechaSalida": "2018-12-31" },
            { "id": 11, "empresa": "Alicorp", "cargo": "Analista", "fechaIngreso": "2019-02-01", "fechaSalida": null }
        ],
        "historialActualizacion": []
    })
}

fn bearer_is(auth: &Option<String>, token: &str) -> bool {
    auth.as_deref() == Some(format!("Bearer {}", token).as_str())
}

async fn handle(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    if req.path() == "/ping" {
        return HttpResponse::Ok().finish();
    }

    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    state.calls.lock().unwrap().push(RecordedCall {
        method: req.method().to_string(),
        path: req.path().to_string(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let authorized = bearer_is(&authorization, ADMIN_TOKEN) || bearer_is(&authorization, USER_TOKEN);

    match (req.method().as_str(), req.path()) {
        ("POST", "/usuario/login") => {
            let email = body["email"].as_str().unwrap_or_default();
            let password = body["contraseña"].as_str().unwrap_or_default();
            match (email, password) {
                ("admin@example.com", "secret") => HttpResponse::Ok().json(json!({
                    "token": { "token": ADMIN_TOKEN },
                    "id": 5,
                    "nombre": "Rosa",
                    "apellido": "Díaz",
                    "email": "admin@example.com",
                    "telefono": 987654321,
                    "rol": "ADMINISTRADOR"
                })),
                ("user@example.com", "secret") => HttpResponse::Ok().json(json!({
                    "token": { "token": USER_TOKEN },
                    "nombre": "Juan",
                    "apellido": "Pérez",
                    "email": "user@example.com",
                    "telefono": 912345678,
                    "rol": "EGRESADO"
                })),
                _ => HttpResponse::Unauthorized().json(json!({ "message": "Credenciales inválidas" })),
            }
        }

        ("POST", "/usuario/registrar") => {
            if !bearer_is(&authorization, ADMIN_TOKEN) {
                return HttpResponse::Forbidden().json(json!({ "message": "Sin permisos" }));
            }
            HttpResponse::Created().json(json!({ "id": 77 }))
        }

        _ if !authorized => HttpResponse::Unauthorized().body("Token inválido"),

        ("GET", "/egresado/obtener/todos") => {
            HttpResponse::Ok().json(json!([stored_graduate(1), stored_graduate(2)]))
        }

        ("GET", path) if path.starts_with("/egresado/obtener/") => {
            match path.trim_start_matches("/egresado/obtener/") {
                "1" => HttpResponse::Ok().json(stored_graduate(1)),
                "2" => HttpResponse::Ok().json(Value::String(stored_graduate(2).to_string())),
                "4" => HttpResponse::InternalServerError()
                    .body(json!({ "message": "Egresado no existe" }).to_string()),
                _ => HttpResponse::NotFound().body("Egresado no encontrado"),
            }
        }

        ("POST", "/egresado/crear") => {
            let mut created = body.clone();
            created["id"] = json!(100);
            HttpResponse::Ok().json(created)
        }

        ("PUT", "/egresado/actualizar") => {
            if body["ponderado"].as_f64().is_some_and(|p| p > 20.0) {
                return HttpResponse::BadRequest().body("Ponderado fuera de rango");
            }
            HttpResponse::Ok().json(body)
        }

        _ => HttpResponse::NotFound().finish(),
    }
}

/// Starts the fake backend on a random port and returns its base URL.
pub async fn spawn_stub_backend(state: web::Data<StubState>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .default_service(web::to(handle))
    })
    .listen(listener)
    .expect("Failed to bind stub backend")
    .workers(1)
    .run();

    actix_rt::spawn(server);

    let client = reqwest::Client::new();
    while client.get(format!("{}/ping", address)).send().await.is_err() {
        actix_rt::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    address
}
