use std::io::{self, BufRead};
use std::path::PathBuf;

use crate::config::{Config, ConfigError};
use crate::costing::{CostError, SupplierCatalog};
use crate::export::ExportError;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단가 계산 오류
    #[error("{0}")]
    Cost(#[from] CostError),
    /// 내보내기 오류
    #[error("내보내기 오류: {0}")]
    Export(#[from] ExportError),
    /// 설정에 없는 제조사
    #[error("알 수 없는 제조사: {0}")]
    UnknownSupplier(String),
    /// 잘못된 명령행 인자
    #[error("잘못된 인자: {0}")]
    InvalidArgument(String),
}

/// 한 번의 실행 동안 유지되는 상태. 카탈로그는 설정에서 복사한 사본이다.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub supplier: String,
    pub catalog: SupplierCatalog,
    pub export_dir: PathBuf,
}

impl Session {
    /// `supplier`가 없으면 설정의 활성 제조사를 쓴다.
    pub fn new(
        config: Config,
        config_path: PathBuf,
        supplier: Option<&str>,
        export_dir: PathBuf,
    ) -> Result<Self, AppError> {
        let supplier = supplier.unwrap_or(&config.active_supplier).to_string();
        let catalog = config
            .catalog_for(&supplier)
            .ok_or_else(|| AppError::UnknownSupplier(supplier.clone()))?;
        tracing::debug!(%supplier, papers = catalog.iter().count(), "session catalog ready");
        Ok(Self {
            config,
            config_path,
            supplier,
            catalog,
            export_dir,
        })
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 입력은 표준 입력에서 읽는다.
pub fn run(session: &mut Session, tr: &Translator) -> Result<(), AppError> {
    let stdin = io::stdin();
    run_with_input(session, tr, &mut stdin.lock())
}

/// 주어진 입력으로 메뉴 루프를 실행한다. 입력이 끝나면 설정을 저장하고 종료한다.
pub fn run_with_input<R: BufRead>(
    session: &mut Session,
    tr: &Translator,
    input: &mut R,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr, input)? {
            MenuChoice::Estimate => ui_cli::handle_estimate(tr, session, input)?,
            MenuChoice::Papers => ui_cli::print_catalog(tr, session),
            MenuChoice::EditPaper => ui_cli::handle_edit_paper(tr, &mut session.catalog, input)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, &mut session.config, input)?;
                session.config.save(&session.config_path)?;
            }
            MenuChoice::Exit => {
                session.config.save(&session.config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
