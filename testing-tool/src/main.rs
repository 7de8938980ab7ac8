use colored::*;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::io::{self, Write};

type ToolResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> ToolResult<()> {
    println!("{}", "🚚 Fleet Management Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = read_base_url()?;
    let client = Client::new();

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Listar vehículos");
        println!("2. 📊 Estadísticas del dashboard");
        println!("3. 🛠️  Crear vehículo de demo con 2 mantenimientos");
        println!("4. 🩺 Diagnóstico de base de datos");
        println!("5. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-5): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let outcome = match choice.trim() {
            "1" => list_vehicles(&client, &base_url).await,
            "2" => show_dashboard(&client, &base_url).await,
            "3" => create_demo_vehicle(&client, &base_url).await,
            "4" => database_health(&client, &base_url).await,
            "5" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn read_base_url() -> ToolResult<String> {
    print!(
        "{}",
        format!("URL del servidor [{}]: ", DEFAULT_BASE_URL).bright_yellow()
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim().trim_end_matches('/');

    Ok(if input.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        input.to_string()
    })
}

async fn list_vehicles(client: &Client, base_url: &str) -> ToolResult<()> {
    println!();
    println!("{}", "🚗 VEHÍCULOS".bright_cyan().bold());

    let response = client.get(format!("{}/api/vehicles", base_url)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_status(status);

    let vehicles = body.as_array().cloned().unwrap_or_default();
    println!("{} {}", "Total:".bright_blue(), vehicles.len());
    for vehicle in vehicles.iter().take(20) {
        println!(
            "  #{:<5} {} {} {} ({}) - {} - {} km",
            vehicle["id"],
            vehicle["vin"].as_str().unwrap_or("-"),
            vehicle["make"].as_str().unwrap_or("-"),
            vehicle["model"].as_str().unwrap_or("-"),
            vehicle["year"],
            vehicle["status"].as_str().unwrap_or("-"),
            vehicle["mileage"],
        );
    }
    if vehicles.len() > 20 {
        println!("  ... y {} más", vehicles.len() - 20);
    }

    Ok(())
}

async fn show_dashboard(client: &Client, base_url: &str) -> ToolResult<()> {
    println!();
    println!("{}", "📊 DASHBOARD".bright_cyan().bold());

    let response = client
        .get(format!("{}/api/dashboard/stats", base_url))
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_status(status);
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}

async fn create_demo_vehicle(client: &Client, base_url: &str) -> ToolResult<()> {
    println!();
    println!("{}", "🛠️  CREANDO VEHÍCULO DE DEMO".bright_cyan().bold());

    let vehicle = json!({
        "vin": random_vin(),
        "make": "Ford",
        "model": "Transit",
        "year": 2022,
        "mileage": 18000,
        "department": "Field Operations"
    });
    let response = client
        .post(format!("{}/api/vehicles", base_url))
        .json(&vehicle)
        .send()
        .await?;
    let status = response.status();
    let created: Value = response.json().await?;
    print_status(status);
    if status != StatusCode::CREATED {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    let vehicle_id = created["id"].as_i64().unwrap_or_default();
    println!("{} {}", "✅ Vehículo creado con id".bright_green(), vehicle_id);

    let now = chrono::Utc::now();
    let services = [
        ("Oil Change", now - chrono::Duration::days(90), 89.99),
        ("Tire Rotation", now - chrono::Duration::days(7), 45.50),
    ];
    for (service_type, service_date, cost) in services {
        let record = json!({
            "vehicleId": vehicle_id,
            "serviceDate": service_date.to_rfc3339(),
            "serviceType": service_type,
            "performedBy": "Testing Tool",
            "cost": cost,
            "mileageAtService": 18000
        });
        let response = client
            .post(format!("{}/api/maintenance", base_url))
            .json(&record)
            .send()
            .await?;
        print_status(response.status());
    }

    let records: Value = client
        .get(format!("{}/api/maintenance/vehicle/{}", base_url, vehicle_id))
        .send()
        .await?
        .json()
        .await?;
    println!("{}", "📦 Mantenimientos del vehículo:".bright_blue());
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}

async fn database_health(client: &Client, base_url: &str) -> ToolResult<()> {
    println!();
    println!("{}", "🩺 DIAGNÓSTICO DE BASE DE DATOS".bright_cyan().bold());

    let response = client
        .get(format!("{}/api/admin/database-health", base_url))
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_status(status);
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}

fn print_status(status: StatusCode) {
    if status.is_success() {
        println!("{} {}", "📥 Status:".bright_blue(), status.to_string().bright_green());
    } else {
        println!("{} {}", "📥 Status:".bright_blue(), status.to_string().bright_red());
    }
}

fn random_vin() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..17)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
