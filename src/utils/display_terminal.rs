//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 부팅 과정(설정 로드, 컴포넌트 등록, 프로바이더 상태)을 터미널에 보여줍니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║               PARSE SOCIAL OAUTH                 ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(50);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// `✓ Step 2: Components registered (7 items)`
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// `   ├─ facebook: ready`
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 프로바이더 인가 플로우 상태를 출력합니다.
///
/// 클라이언트 ID가 없는 프로바이더도 `/login`, `/link`는 동작하므로 구분해서 표시합니다.
pub fn print_provider_status(provider: &str, authorize_enabled: bool) {
    let status = if authorize_enabled {
        "login + authorize"
    } else {
        "login only (client id missing)"
    };
    print_sub_task(provider, status);
}

pub fn print_final_summary(providers: usize, components: usize) {
    println!();
    print_boxed_title("🎉 SOCIAL OAUTH SERVICE READY");
    println!("   🔑 Providers: {}", providers);
    println!("   🔧 Components: {}", components);
    println!();
}
