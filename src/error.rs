use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("No se encuentra el archivo: {0}")]
    FileNotFound(String),

    #[error("No se encuentra la carpeta: {0}")]
    FolderNotFound(String),

    #[error("Libro Excel no válido: {0}")]
    Workbook(String),

    #[error("Error de imagen: {0}")]
    Image(#[from] image::ImageError),

    #[error("El catálogo no se pudo cargar: {0}")]
    Catalog(#[from] mineral_catalog_common::LoadError),

    #[error("Error JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl From<mineral_catalog_common::Error> for CatalogError {
    fn from(err: mineral_catalog_common::Error) -> Self {
        match err {
            mineral_catalog_common::Error::Io(e) => CatalogError::Io(e),
            mineral_catalog_common::Error::Json(e) => CatalogError::JsonParse(e),
            mineral_catalog_common::Error::Load(e) => CatalogError::Catalog(e),
        }
    }
}

impl From<calamine::Error> for CatalogError {
    fn from(err: calamine::Error) -> Self {
        CatalogError::Workbook(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
