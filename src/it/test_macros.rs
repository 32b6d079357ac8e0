macro_rules! tassert {
    ($cond:expr) => {
        if !$cond {
            bail!(
                "Assert `{}` failed ({}:{})",
                stringify!($cond),
                file!(),
                line!()
            );
        }
    };
}

macro_rules! tassert_eq {
    ($left:expr, $right:expr) => {{
        let left = $left;
        let right = $right;
        if left != right {
            bail!(
                "Assert `{} = {:?} = {:?} = {}` failed ({}:{})",
                stringify!($left),
                left,
                right,
                stringify!($right),
                file!(),
                line!()
            );
        }
    }};
}

macro_rules! tassert_err {
    ($res:expr, $ty:ty, $pat:pat) => {{
        match $res {
            Ok(_) => bail!(
                "`{}` succeeded unexpectedly ({}:{})",
                stringify!($res),
                file!(),
                line!()
            ),
            Err(e) => match e.object_error::<$ty>() {
                Some($pat) => {}
                _ => bail!(
                    "`{}` failed with an unexpected error: {} ({}:{})",
                    stringify!($res),
                    crate::utils::errorfmt::ErrorFmt(&e),
                    file!(),
                    line!()
                ),
            },
        }
    }};
}
