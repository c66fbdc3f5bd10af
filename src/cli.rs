use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sonrisas")]
#[command(about = "Administración de la clínica dental Sonrisas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Logs detallados
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// URL base del backend (tiene prioridad sobre SONRISAS_API_URL y el archivo de configuración)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pacientes
    Patients {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Citas
    Appointments {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Odontólogos
    Dentists {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Consultorios
    Offices {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Radiografías (no se pueden editar)
    Radiographs {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Totales y próximas citas de la semana
    Dashboard,

    /// Resumen de la clínica
    Overview,

    /// Mostrar/editar la configuración
    Config {
        /// Guardar la URL base del backend
        #[arg(long)]
        set_api_url: Option<String>,

        /// Cantidad de radiografías recientes a listar
        #[arg(long)]
        set_recent: Option<usize>,

        /// Mostrar la configuración
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum ResourceAction {
    /// Listar registros
    List {
        /// Texto a buscar
        #[arg(short, long)]
        search: Option<String>,

        /// Página (desde 1)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Mostrar todos los registros sin paginar
        #[arg(long)]
        all: bool,
    },

    /// Mostrar un registro
    Show {
        id: u64,
    },

    /// Listar los campos del formulario
    Fields,

    /// Crear un registro
    Create {
        /// Campo en formato nombre=valor (repetible)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Imagen .jpg/.png
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Actualizar un registro
    Update {
        id: u64,

        /// Campo en formato nombre=valor (repetible)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Imagen .jpg/.png
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Eliminar un registro
    Delete {
        id: u64,

        /// No pedir confirmación
        #[arg(short, long)]
        yes: bool,
    },
}

/// `nombre=valor`; the value may be empty or contain `=`
pub fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Campo inválido: '{}'. Use nombre=valor", s)),
    }
}
