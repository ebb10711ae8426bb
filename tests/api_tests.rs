use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use condominios_api::{
    build_app, config::EnvironmentConfig, repositories::Repositories, state::AppState,
};

fn create_test_app() -> Router {
    build_app(AppState::new(
        Repositories::memory(),
        EnvironmentConfig::for_tests(),
    ))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

struct TestContext {
    app: Router,
    admin_token: String,
    resident_token: String,
    resident_id: String,
}

/// Admin inicial más un residente registrado por él
async fn setup() -> TestContext {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/first-admin",
        None,
        Some(json!({
            "name": "Administración",
            "email": "admin@condominio.mx",
            "password": "secreto123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, "admin@condominio.mx", "secreto123").await;
    assert_eq!(status, StatusCode::OK);
    let admin_token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(&admin_token),
        Some(json!({
            "name": "Ana Torres",
            "email": "ana@condominio.mx",
            "password": "vecina123",
            "unidad": "A-101"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let resident_id = body["user"]["id"].as_str().unwrap().to_string();

    let (_, body) = login(&app, "ana@condominio.mx", "vecina123").await;
    let resident_token = body["token"].as_str().unwrap().to_string();

    TestContext {
        app,
        admin_token,
        resident_token,
        resident_id,
    }
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["name"], "condominios-api");
}

#[tokio::test]
async fn test_first_admin_only_once() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/auth/first-admin",
        None,
        Some(json!({
            "name": "Otro",
            "email": "otro@condominio.mx",
            "password": "secreto123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_user_without_password() {
    let ctx = setup().await;
    let (status, body) = login(&ctx.app, "ADMIN@condominio.mx", "secreto123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password").is_none());

    let (status, _) = login(&ctx.app, "admin@condominio.mx", "incorrecta").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ctx = setup().await;

    let (status, _) = send(&ctx.app, Method::GET, "/api/anuncios", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&ctx.app, Method::GET, "/api/anuncios", Some("no-es-un-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&ctx.app, Method::GET, "/api/auth/profile", Some(&ctx.resident_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ana@condominio.mx");
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/auth/register",
        Some(&ctx.admin_token),
        Some(json!({
            "name": "Ana Repetida",
            "email": "Ana@Condominio.mx",
            "password": "vecina123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_resident_cannot_use_admin_operations() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/anuncios",
        Some(&ctx.resident_token),
        Some(json!({ "titulo": "Fuga", "descripcion": "Hay una fuga" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&ctx.app, Method::GET, "/api/pagos", Some(&ctx.resident_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&ctx.app, Method::GET, "/api/auth/users", Some(&ctx.resident_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_user_cannot_login_but_is_retrievable() {
    let ctx = setup().await;
    let uri = format!("/api/auth/users/{}", ctx.resident_id);

    let (status, _) = send(&ctx.app, Method::DELETE, &uri, Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = login(&ctx.app, "ana@condominio.mx", "vecina123").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&ctx.app, Method::GET, &uri, Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["estado"], "inactivo");

    let (_, body) = send(&ctx.app, Method::GET, "/api/auth/users", Some(&ctx.admin_token), None).await;
    let users = body["users"].as_array().unwrap();
    assert!(users.iter().all(|u| u["id"] != ctx.resident_id.as_str()));

    let (_, body) = send(
        &ctx.app,
        Method::GET,
        "/api/auth/users?incluirInactivos=true",
        Some(&ctx.admin_token),
        None,
    )
    .await;
    let users = body["users"].as_array().unwrap();
    assert!(users.iter().any(|u| u["id"] == ctx.resident_id.as_str()));
}

#[tokio::test]
async fn test_reservation_overlap_is_rejected() {
    let ctx = setup().await;
    let reservar = |inicio: &str, fin: &str| {
        json!({
            "area": "Alberca",
            "fecha": "2027-03-10",
            "horaInicio": inicio,
            "horaFin": fin
        })
    };

    let (status, body) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.resident_token),
        Some(reservar("14:00", "16:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["reservacion"]["estado"], "Confirmada");
    assert_eq!(body["reservacion"]["horaInicio"], "14:00");

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.admin_token),
        Some(reservar("15:00", "17:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.admin_token),
        Some(reservar("16:00", "18:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_reservation_rejects_bad_interval_and_unknown_area() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.resident_token),
        Some(json!({
            "area": "Alberca",
            "fecha": "2027-03-10",
            "horaInicio": "18:00",
            "horaFin": "17:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.resident_token),
        Some(json!({
            "area": "Helipuerto",
            "fecha": "2027-03-10",
            "horaInicio": "10:00",
            "horaFin": "11:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resident_can_only_cancel_own_reservation() {
    let ctx = setup().await;

    let (_, body) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.resident_token),
        Some(json!({
            "area": "Salón de fiestas",
            "fecha": "2027-05-01",
            "horaInicio": "18:00",
            "horaFin": "23:00"
        })),
    )
    .await;
    let uri = format!("/api/reservaciones/{}", body["reservacion"]["id"].as_str().unwrap());

    let (status, _) = send(
        &ctx.app,
        Method::PUT,
        &uri,
        Some(&ctx.resident_token),
        Some(json!({ "horaFin": "23:30" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &ctx.app,
        Method::PUT,
        &uri,
        Some(&ctx.resident_token),
        Some(json!({ "estado": "Cancelada" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reservacion"]["estado"], "Cancelada");

    // El horario cancelado vuelve a estar libre
    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.admin_token),
        Some(json!({
            "area": "Salón de fiestas",
            "fecha": "2027-05-01",
            "horaInicio": "19:00",
            "horaFin": "22:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_marcar_pago_sin_cuerpo() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        Method::POST,
        "/api/pagos",
        Some(&ctx.admin_token),
        Some(json!({
            "usuario": ctx.resident_id,
            "concepto": "Mantenimiento",
            "monto": 1500,
            "mes": "Marzo 2027",
            "fechaVencimiento": "2027-03-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["pago"]["estado"], "Pendiente");
    assert_eq!(body["pago"]["usuario"]["email"], "ana@condominio.mx");
    let uri = format!("/api/pagos/{}/pagar", body["pago"]["id"].as_str().unwrap());

    let (status, body) = send(&ctx.app, Method::PATCH, &uri, Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pago"]["estado"], "Pagado");
    assert_eq!(body["pago"]["metodoPago"], "No especificado");
    assert!(body["pago"]["fechaPago"].is_string());

    let (_, body) = send(&ctx.app, Method::GET, "/api/pagos/mis-pagos", Some(&ctx.resident_token), None).await;
    assert_eq!(body["pagos"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_pago_for_unknown_user_is_not_found() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/pagos",
        Some(&ctx.admin_token),
        Some(json!({
            "usuario": uuid::Uuid::new_v4(),
            "concepto": "Multa",
            "monto": 200,
            "fechaVencimiento": "2027-03-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_visitante_lifecycle() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        Method::POST,
        "/api/visitantes",
        Some(&ctx.resident_token),
        Some(json!({
            "nombreVisitante": "Luis Pérez",
            "fechaVisita": "2027-03-12",
            "horaLlegada": "10:30",
            "vehiculo": { "placas": "abc-123" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["visitante"]["estado"], "Pendiente");
    let uri = format!("/api/visitantes/{}", body["visitante"]["id"].as_str().unwrap());

    // El residente no cambia el estado
    let (status, _) = send(
        &ctx.app,
        Method::PUT,
        &uri,
        Some(&ctx.resident_token),
        Some(json!({ "estado": "Aprobada" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&ctx.app, Method::PATCH, &format!("{}/entrada", uri), Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visitante"]["estado"], "Aprobada");
    assert!(body["visitante"]["horaEntrada"].is_string());

    // Ya no está pendiente
    let (status, _) = send(
        &ctx.app,
        Method::PUT,
        &uri,
        Some(&ctx.resident_token),
        Some(json!({ "notas": "Llega tarde" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&ctx.app, Method::PATCH, &format!("{}/salida", uri), Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visitante"]["estado"], "Finalizada");
}

#[tokio::test]
async fn test_mensajes_between_resident_and_admin() {
    let ctx = setup().await;

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/mensajes",
        Some(&ctx.resident_token),
        Some(json!({ "mensaje": "¿Cuándo arreglan el elevador?" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&ctx.app, Method::GET, "/api/mensajes/no-leidos", Some(&ctx.admin_token), None).await;
    assert_eq!(body["noLeidos"], 1);

    let (status, body) = send(&ctx.app, Method::GET, "/api/mensajes/conversaciones", Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let conversaciones = body["conversaciones"].as_array().unwrap();
    assert_eq!(conversaciones.len(), 1);
    assert_eq!(conversaciones[0]["usuario"]["id"], ctx.resident_id.as_str());

    // Sin destinatario el admin recibe 400
    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/mensajes",
        Some(&ctx.admin_token),
        Some(json!({ "mensaje": "Mañana" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/mensajes",
        Some(&ctx.admin_token),
        Some(json!({ "para": ctx.resident_id, "mensaje": "Mañana" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &ctx.app,
        Method::PUT,
        "/api/mensajes/marcar-leido",
        Some(&ctx.admin_token),
        Some(json!({ "conUsuarioId": ctx.resident_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&ctx.app, Method::GET, "/api/mensajes/no-leidos", Some(&ctx.admin_token), None).await;
    assert_eq!(body["noLeidos"], 0);

    let (_, body) = send(&ctx.app, Method::GET, "/api/mensajes/conversacion", Some(&ctx.resident_token), None).await;
    assert_eq!(body["mensajes"].as_array().unwrap().len(), 2);

    let (status, _) = send(&ctx.app, Method::GET, "/api/mensajes/conversacion", Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_encuesta_single_response_and_results() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        Method::POST,
        "/api/encuestas",
        Some(&ctx.admin_token),
        Some(json!({
            "titulo": "Horario del gym",
            "preguntas": [
                {
                    "textoPregunta": "¿Qué horario prefieres?",
                    "tipoPregunta": "opcion_multiple",
                    "opciones": ["Mañana", "Noche"]
                }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let encuesta_id = body["encuesta"]["id"].as_str().unwrap().to_string();
    let pregunta_id = body["encuesta"]["preguntas"][0]["id"].as_str().unwrap().to_string();
    let responder = format!("/api/encuestas/{}/responder", encuesta_id);
    let respuesta = json!({ "respuestas": [{ "preguntaId": pregunta_id, "respuesta": "Noche" }] });

    let (status, _) = send(&ctx.app, Method::POST, &responder, Some(&ctx.resident_token), Some(respuesta.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&ctx.app, Method::POST, &responder, Some(&ctx.resident_token), Some(respuesta)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&ctx.app, Method::GET, "/api/encuestas", Some(&ctx.resident_token), None).await;
    assert_eq!(body["encuestas"][0]["yaRespondio"], true);

    let (status, body) = send(
        &ctx.app,
        Method::GET,
        &format!("/api/encuestas/{}/resultados", encuesta_id),
        Some(&ctx.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["encuesta"]["totalRespuestas"], 1);
    assert_eq!(body["resultados"][0]["resumen"]["Noche"], 1);
    assert_eq!(body["respuestasDetalladas"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &ctx.app,
        Method::PATCH,
        &format!("/api/encuestas/{}/cerrar", encuesta_id),
        Some(&ctx.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Cerrada: los residentes ya no la ven
    let (_, body) = send(&ctx.app, Method::GET, "/api/encuestas", Some(&ctx.resident_token), None).await;
    assert!(body["encuestas"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_encuesta_requires_all_questions() {
    let ctx = setup().await;

    let (_, body) = send(
        &ctx.app,
        Method::POST,
        "/api/encuestas",
        Some(&ctx.admin_token),
        Some(json!({
            "titulo": "Mantenimiento",
            "preguntas": [
                { "textoPregunta": "Califica el servicio", "tipoPregunta": "escala" },
                { "textoPregunta": "Comentarios", "tipoPregunta": "texto_libre" }
            ]
        })),
    )
    .await;
    let encuesta_id = body["encuesta"]["id"].as_str().unwrap();
    let pregunta_id = body["encuesta"]["preguntas"][0]["id"].as_str().unwrap();

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        &format!("/api/encuestas/{}/responder", encuesta_id),
        Some(&ctx.resident_token),
        Some(json!({ "respuestas": [{ "preguntaId": pregunta_id, "respuesta": 4 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deactivated_user_token_is_rejected() {
    let ctx = setup().await;

    let (status, _) = send(&ctx.app, Method::GET, "/api/auth/profile", Some(&ctx.resident_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/api/auth/users/{}", ctx.resident_id);
    let (status, _) = send(&ctx.app, Method::DELETE, &uri, Some(&ctx.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&ctx.app, Method::GET, "/api/auth/profile", Some(&ctx.resident_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Usuario desactivado. Contacte al administrador");

    let (status, _) = send(&ctx.app, Method::GET, "/api/reservaciones", Some(&ctx.resident_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_update_into_taken_slot_is_conflict() {
    let ctx = setup().await;
    let reservar = |inicio: &str, fin: &str| {
        json!({
            "area": "Alberca",
            "fecha": "2027-04-02",
            "horaInicio": inicio,
            "horaFin": fin
        })
    };

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.resident_token),
        Some(reservar("10:00", "12:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &ctx.app,
        Method::POST,
        "/api/reservaciones",
        Some(&ctx.admin_token),
        Some(reservar("12:00", "14:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/reservaciones/{}", body["reservacion"]["id"].as_str().unwrap());

    let (status, _) = send(
        &ctx.app,
        Method::PUT,
        &uri,
        Some(&ctx.admin_token),
        Some(json!({ "horaInicio": "11:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Mover dentro de su propio horario no choca consigo misma
    let (status, body) = send(
        &ctx.app,
        Method::PUT,
        &uri,
        Some(&ctx.admin_token),
        Some(json!({ "horaFin": "13:30" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reservacion"]["horaFin"], "13:30");
}

#[tokio::test]
async fn test_marcar_pago_con_cuerpo() {
    let ctx = setup().await;

    let crear = json!({
        "usuario": ctx.resident_id,
        "concepto": "Mantenimiento",
        "monto": 1500,
        "mes": "Marzo 2027",
        "fechaVencimiento": "2027-03-31"
    });
    let (_, body) = send(&ctx.app, Method::POST, "/api/pagos", Some(&ctx.admin_token), Some(crear.clone())).await;
    let uri = format!("/api/pagos/{}/pagar", body["pago"]["id"].as_str().unwrap());

    let (status, body) = send(
        &ctx.app,
        Method::PATCH,
        &uri,
        Some(&ctx.admin_token),
        Some(json!({ "fechaPago": "2027-03-15T10:00:00Z", "metodoPago": "Transferencia" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pago"]["metodoPago"], "Transferencia");
    assert!(body["pago"]["fechaPago"].as_str().unwrap().starts_with("2027-03-15"));

    // Una fecha mal escrita no se confunde con un cuerpo ausente
    let (_, body) = send(&ctx.app, Method::POST, "/api/pagos", Some(&ctx.admin_token), Some(crear)).await;
    let uri = format!("/api/pagos/{}/pagar", body["pago"]["id"].as_str().unwrap());

    let (status, _) = send(
        &ctx.app,
        Method::PATCH,
        &uri,
        Some(&ctx.admin_token),
        Some(json!({ "fechaPago": "no-es-fecha", "metodoPago": "Efectivo" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&ctx.app, Method::GET, &uri.replace("/pagar", ""), Some(&ctx.admin_token), None).await;
    assert_eq!(body["pago"]["estado"], "Pendiente");
}

#[tokio::test]
async fn test_marcar_leido_rejects_malformed_body() {
    let ctx = setup().await;

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/mensajes/marcar-leido")
        .header(header::AUTHORIZATION, format!("Bearer {}", ctx.admin_token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"conUsuarioId\":"))
        .unwrap();
    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&ctx.app, Method::PUT, "/api/mensajes/marcar-leido", Some(&ctx.resident_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_encuesta_anonima_oculta_respuestas() {
    let ctx = setup().await;

    let (status, body) = send(
        &ctx.app,
        Method::POST,
        "/api/encuestas",
        Some(&ctx.admin_token),
        Some(json!({
            "titulo": "Cuota extraordinaria",
            "anonima": true,
            "preguntas": [
                { "textoPregunta": "¿Estás de acuerdo?", "tipoPregunta": "opcion_multiple", "opciones": ["Sí", "No"] }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let encuesta_id = body["encuesta"]["id"].as_str().unwrap().to_string();
    let pregunta_id = body["encuesta"]["preguntas"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        &format!("/api/encuestas/{}/responder", encuesta_id),
        Some(&ctx.resident_token),
        Some(json!({ "respuestas": [{ "preguntaId": pregunta_id, "respuesta": "Sí" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &ctx.app,
        Method::GET,
        &format!("/api/encuestas/{}/resultados", encuesta_id),
        Some(&ctx.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["encuesta"]["totalRespuestas"], 1);
    assert!(body["respuestasDetalladas"].is_null());
}

#[tokio::test]
async fn test_encuesta_cerrada_no_acepta_respuestas() {
    let ctx = setup().await;
    let crear = |titulo: &str, fecha_cierre: Option<&str>| {
        let mut body = json!({
            "titulo": titulo,
            "preguntas": [{ "textoPregunta": "Comentarios", "tipoPregunta": "texto_libre" }]
        });
        if let Some(fecha) = fecha_cierre {
            body["fechaCierre"] = json!(fecha);
        }
        body
    };

    // Cerrada manualmente
    let (_, body) = send(&ctx.app, Method::POST, "/api/encuestas", Some(&ctx.admin_token), Some(crear("Pintura", None))).await;
    let encuesta_id = body["encuesta"]["id"].as_str().unwrap().to_string();
    let pregunta_id = body["encuesta"]["preguntas"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &ctx.app,
        Method::PATCH,
        &format!("/api/encuestas/{}/cerrar", encuesta_id),
        Some(&ctx.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        &format!("/api/encuestas/{}/responder", encuesta_id),
        Some(&ctx.resident_token),
        Some(json!({ "respuestas": [{ "preguntaId": pregunta_id, "respuesta": "Azul" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Fecha de cierre vencida
    let (status, body) = send(
        &ctx.app,
        Method::POST,
        "/api/encuestas",
        Some(&ctx.admin_token),
        Some(crear("Jardín", Some("2020-01-01T00:00:00Z"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let encuesta_id = body["encuesta"]["id"].as_str().unwrap().to_string();
    let pregunta_id = body["encuesta"]["preguntas"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &ctx.app,
        Method::POST,
        &format!("/api/encuestas/{}/responder", encuesta_id),
        Some(&ctx.resident_token),
        Some(json!({ "respuestas": [{ "preguntaId": pregunta_id, "respuesta": "Más árboles" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
